//! Read-side views: completion preview, loyalty summary, open slots,
//! confirmation links and live snapshots.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::{available_slots, day_slots};
use crate::error::{EngineError, EngineResult};
use crate::format::{format_currency_with, generate_whatsapp_link_with};
use crate::loyalty::{CompletionHint, LoyaltyProgress, LoyaltySummary, completion_hint};
use crate::models::{Appointment, AppointmentStatus, Barber, Customer, Service, slot_time};
use crate::store::{DocumentStore, Filter, Record, Snapshot};

use super::FrontDesk;

/// What the operator sees before completing an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionPreview {
    /// The appointment.
    pub appointment_id: String,
    /// Its current status.
    pub status: AppointmentStatus,
    /// Slot start time.
    #[serde(with = "slot_time")]
    pub time: NaiveTime,
    /// Customer name.
    pub customer_name: String,
    /// Service name.
    pub service_name: String,
    /// Barber name.
    pub barber_name: String,
    /// Price that a paid completion charges.
    pub price: Decimal,
    /// Price in the shop's currency format.
    pub price_text: String,
    /// Which completion path to offer.
    pub hint: CompletionHint,
    /// Free-cut cycle position.
    pub progress: LoyaltyProgress,
    /// Progress rendered as `cuts/cycle`.
    pub progress_text: String,
}

impl<S: DocumentStore> FrontDesk<S> {
    /// Gathers what an operator needs to decide how to complete an appointment.
    pub fn completion_preview(&self, appointment_id: &str) -> EngineResult<CompletionPreview> {
        let appointment = self.fetch::<Appointment>(appointment_id)?;
        let customer = self.fetch::<Customer>(&appointment.customer_id)?;
        let service = self.fetch::<Service>(&appointment.service_id)?;
        let barber = self.fetch::<Barber>(&appointment.barber_id)?;

        let cycle = self.config.loyalty().free_cut_cycle;
        let price = appointment.price.unwrap_or(service.price);
        let progress = LoyaltyProgress::of(&customer, cycle);

        Ok(CompletionPreview {
            appointment_id: appointment.id,
            status: appointment.status,
            time: appointment.time,
            customer_name: customer.name.clone(),
            service_name: service.name,
            barber_name: barber.name,
            price,
            price_text: format_currency_with(price, self.config.currency()),
            hint: completion_hint(&customer, cycle),
            progress_text: progress.to_string(),
            progress,
        })
    }

    /// Summarises a customer's loyalty standing.
    pub fn loyalty_summary(&self, customer_id: &str) -> EngineResult<LoyaltySummary> {
        let customer = self.fetch::<Customer>(customer_id)?;
        Ok(LoyaltySummary::for_customer(&customer, &self.config))
    }

    /// Returns the open slots of a barber on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Inactive`] if the barber is not taking bookings.
    pub fn available_slots(&self, barber_id: &str, date: NaiveDate) -> EngineResult<Vec<NaiveTime>> {
        let barber = self.fetch::<Barber>(barber_id)?;
        if !barber.active {
            return Err(EngineError::Inactive {
                collection: Barber::COLLECTION.to_string(),
                id: barber.id,
            });
        }

        let booked: Vec<Appointment> = self.store.find(
            self.tenant(),
            &[
                Filter::eq("barber_id", barber_id),
                Filter::eq("date", date.to_string()),
                Filter::ne("status", AppointmentStatus::Cancelled.as_str()),
            ],
        )?;
        Ok(available_slots(
            &day_slots(self.config.schedule()),
            &booked,
            barber_id,
            date,
        ))
    }

    /// Builds a WhatsApp link that sends the customer a booking confirmation.
    pub fn confirmation_link(&self, appointment_id: &str) -> EngineResult<String> {
        let appointment = self.fetch::<Appointment>(appointment_id)?;
        let customer = self.fetch::<Customer>(&appointment.customer_id)?;
        let service = self.fetch::<Service>(&appointment.service_id)?;
        let barber = self.fetch::<Barber>(&appointment.barber_id)?;
        let price = appointment.price.unwrap_or(service.price);

        let message = format!(
            "Olá {}! Seu horário na {} está agendado: {} com {} em {} às {}. Valor: {}.",
            customer.name,
            self.config.shop().name,
            service.name,
            barber.name,
            appointment.date.format("%d/%m/%Y"),
            slot_time::format(appointment.time),
            format_currency_with(price, self.config.currency()),
        );

        Ok(generate_whatsapp_link_with(
            &customer.phone,
            &message,
            &self.config.messaging().country_code,
        ))
    }

    /// Subscribes to the shop's appointments.
    pub fn watch_appointments(&self) -> EngineResult<Snapshot<Appointment>> {
        Ok(self.store.subscribe(self.tenant())?)
    }

    /// Subscribes to the shop's customers.
    pub fn watch_customers(&self) -> EngineResult<Snapshot<Customer>> {
        Ok(self.store.subscribe(self.tenant())?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{contact, desk};
    use super::*;
    use crate::booking::BookingRequest;
    use crate::loyalty::Settlement;
    use crate::store::{MemoryStore, to_document};

    fn at(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 10).unwrap()
    }

    fn booked(desk: &FrontDesk<MemoryStore>, time: &str) -> Appointment {
        let barber = desk
            .active_barbers()
            .unwrap()
            .into_iter()
            .next()
            .unwrap_or_else(|| desk.add_barber("Barber Jack").unwrap());
        let service = desk
            .active_services()
            .unwrap()
            .into_iter()
            .next()
            .unwrap_or_else(|| desk.add_service("Haircut", Decimal::from(50)).unwrap());
        desk.book_appointment(BookingRequest {
            customer: contact("John Doe", "11999999999"),
            barber_id: barber.id,
            service_id: service.id,
            date: date(),
            time: at(time),
            status: None,
        })
        .unwrap()
    }

    fn set_loyalty(desk: &FrontDesk<MemoryStore>, customer_id: &str, cuts: u32, free: u32) {
        let mut customer = desk.customer(customer_id).unwrap();
        customer.loyalty_cuts = cuts;
        customer.free_cuts_available = free;
        desk.store()
            .update::<Customer>(desk.tenant(), customer_id, to_document(&customer).unwrap())
            .unwrap();
    }

    #[test]
    fn test_preview_shows_names_and_progress() {
        let desk = desk();
        let appointment = booked(&desk, "14:00");
        set_loyalty(&desk, &appointment.customer_id, 5, 0);

        let preview = desk.completion_preview(&appointment.id).unwrap();
        assert_eq!(preview.customer_name, "John Doe");
        assert_eq!(preview.service_name, "Haircut");
        assert_eq!(preview.barber_name, "Barber Jack");
        assert_eq!(preview.progress_text, "5/10");
        assert_eq!(preview.price_text, "R$ 50,00");
        assert_eq!(preview.hint, CompletionHint::Standard);
    }

    #[test]
    fn test_preview_hints() {
        let desk = desk();
        let appointment = booked(&desk, "14:00");

        set_loyalty(&desk, &appointment.customer_id, 9, 0);
        assert_eq!(
            desk.completion_preview(&appointment.id).unwrap().hint,
            CompletionHint::AboutToEarnFreeCut
        );

        set_loyalty(&desk, &appointment.customer_id, 9, 1);
        assert_eq!(
            desk.completion_preview(&appointment.id).unwrap().hint,
            CompletionHint::RedeemFreeCut { available: 1 }
        );
    }

    #[test]
    fn test_loyalty_summary_after_completion() {
        let desk = desk();
        let appointment = booked(&desk, "14:00");
        desk.complete_appointment(&appointment.id, Settlement::Paid)
            .unwrap();

        let summary = desk.loyalty_summary(&appointment.customer_id).unwrap();
        assert_eq!(summary.points, 25);
        assert_eq!(summary.tier, "Bronze");
        assert_eq!(summary.next_tier.unwrap().points_needed, 75);
        assert_eq!(summary.progress_text, "1/10");
    }

    #[test]
    fn test_available_slots_excludes_booked_times() {
        let desk = desk();
        let appointment = booked(&desk, "14:00");

        let slots = desk.available_slots(&appointment.barber_id, date()).unwrap();
        assert_eq!(slots.len(), 19);
        assert!(!slots.contains(&at("14:00")));
        assert_eq!(slots.first(), Some(&at("09:00")));
        assert_eq!(slots.last(), Some(&at("18:30")));

        let other_day = date().succ_opt().unwrap();
        assert_eq!(desk.available_slots(&appointment.barber_id, other_day).unwrap().len(), 20);
    }

    #[test]
    fn test_available_slots_for_inactive_barber_fails() {
        let desk = desk();
        let barber = desk.add_barber("Carlos").unwrap();
        desk.set_barber_active(&barber.id, false).unwrap();
        assert!(matches!(
            desk.available_slots(&barber.id, date()),
            Err(EngineError::Inactive { .. })
        ));
    }

    #[test]
    fn test_confirmation_link_targets_customer_phone() {
        let desk = desk();
        let appointment = booked(&desk, "14:00");

        let link = desk.confirmation_link(&appointment.id).unwrap();
        assert!(link.starts_with("https://wa.me/5511999999999?text="));
        assert!(link.contains("10%2F10%2F2023"));
        assert!(link.contains("14%3A00"));
        assert!(link.contains("R%24%2050%2C00"));
    }

    #[test]
    fn test_watch_appointments_sees_new_bookings() {
        let desk = desk();
        let mut snapshot = desk.watch_appointments().unwrap();
        assert!(snapshot.records().is_empty());

        let appointment = booked(&desk, "14:00");
        assert!(snapshot.refresh().unwrap());
        assert_eq!(snapshot.records(), &[appointment]);
    }

    #[test]
    fn test_watch_customers_sees_loyalty_updates() {
        let desk = desk();
        let appointment = booked(&desk, "14:00");
        let mut snapshot = desk.watch_customers().unwrap();
        assert_eq!(snapshot.records()[0].loyalty_points, 0);

        desk.complete_appointment(&appointment.id, Settlement::Paid)
            .unwrap();
        snapshot.refresh().unwrap();
        assert_eq!(snapshot.records()[0].loyalty_points, 25);
    }
}
