//! Caller-owned views of a collection kept current by the store.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::CollaboratorError;

use super::record::{Document, Record, from_document};

/// The push feed of one collection: its full contents after every write.
pub type CollectionFeed = watch::Receiver<Arc<Vec<Document>>>;

/// A typed, caller-owned copy of a collection.
///
/// The snapshot only changes when the owner calls [`Snapshot::refresh`] or
/// awaits [`Snapshot::changed`].
#[derive(Debug)]
pub struct Snapshot<R> {
    feed: CollectionFeed,
    records: Vec<R>,
}

impl<R: Record> Snapshot<R> {
    /// Wraps a feed, decoding its current contents.
    pub fn new(feed: CollectionFeed) -> Result<Self, CollaboratorError> {
        let mut snapshot = Self {
            feed,
            records: Vec::new(),
        };
        snapshot.reload()?;
        Ok(snapshot)
    }

    /// Returns the records as of the last refresh.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Pulls the latest contents if the collection changed.
    ///
    /// Returns true if the records were replaced.
    pub fn refresh(&mut self) -> Result<bool, CollaboratorError> {
        let changed = self.feed.has_changed().map_err(|_| closed::<R>())?;
        if changed {
            self.reload()?;
        }
        Ok(changed)
    }

    /// Waits for the next write to the collection and returns the new records.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError::Unavailable`] if the store was dropped.
    pub async fn changed(&mut self) -> Result<&[R], CollaboratorError> {
        self.feed.changed().await.map_err(|_| closed::<R>())?;
        self.reload()?;
        Ok(&self.records)
    }

    fn reload(&mut self) -> Result<(), CollaboratorError> {
        let documents = Arc::clone(&self.feed.borrow_and_update());
        self.records = documents
            .iter()
            .map(from_document::<R>)
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}

fn closed<R: Record>() -> CollaboratorError {
    CollaboratorError::Unavailable {
        message: format!("{} feed closed", R::COLLECTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Barber;
    use crate::store::record::to_document;

    fn barber(id: &str, name: &str) -> Document {
        to_document(&Barber {
            id: id.to_string(),
            name: name.to_string(),
            active: true,
        })
        .unwrap()
    }

    #[test]
    fn test_snapshot_decodes_initial_contents() {
        let (_tx, rx) = watch::channel(Arc::new(vec![barber("b1", "Carlos")]));
        let snapshot = Snapshot::<Barber>::new(rx).unwrap();
        assert_eq!(snapshot.records().len(), 1);
        assert_eq!(snapshot.records()[0].name, "Carlos");
    }

    #[test]
    fn test_refresh_only_reports_real_changes() {
        let (tx, rx) = watch::channel(Arc::new(vec![]));
        let mut snapshot = Snapshot::<Barber>::new(rx).unwrap();
        assert!(!snapshot.refresh().unwrap());

        tx.send_replace(Arc::new(vec![barber("b1", "Carlos")]));
        assert!(snapshot.refresh().unwrap());
        assert_eq!(snapshot.records().len(), 1);
        assert!(!snapshot.refresh().unwrap());
    }

    #[test]
    fn test_snapshot_is_stable_until_refreshed() {
        let (tx, rx) = watch::channel(Arc::new(vec![]));
        let mut snapshot = Snapshot::<Barber>::new(rx).unwrap();

        tx.send_replace(Arc::new(vec![barber("b1", "Carlos")]));
        assert!(snapshot.records().is_empty());
        snapshot.refresh().unwrap();
        assert_eq!(snapshot.records().len(), 1);
    }

    #[tokio::test]
    async fn test_changed_waits_for_next_write() {
        let (tx, rx) = watch::channel(Arc::new(vec![]));
        let mut snapshot = Snapshot::<Barber>::new(rx).unwrap();

        tokio::spawn(async move {
            tx.send_replace(Arc::new(vec![barber("b1", "Carlos"), barber("b2", "Rafael")]));
        });

        let records = snapshot.changed().await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_changed_fails_when_store_is_gone() {
        let (tx, rx) = watch::channel(Arc::new(vec![]));
        let mut snapshot = Snapshot::<Barber>::new(rx).unwrap();
        drop(tx);

        assert!(matches!(
            snapshot.changed().await,
            Err(CollaboratorError::Unavailable { .. })
        ));
    }
}
