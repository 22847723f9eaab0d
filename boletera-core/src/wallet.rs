//! Pure descriptions of everything the ticket view shows.
//! Building them involves no I/O, so the adapter only has to attach
//! the result to whatever surface it renders on.

use serde::Serialize;

use crate::catalog::{Event, Ticket, TicketId, User};
use crate::util::format_currency;

/// Aggregate figures for the tickets a user owns
#[derive(Debug, Clone, Copy)]
pub struct WalletStats {
    pub count: usize,
    /// Sum of price, service fee and issuance fee over every ticket
    pub total: f64,
}

impl WalletStats {
    pub fn from_tickets(tickets: &[&Ticket]) -> Self {
        Self {
            count: tickets.len(),
            total: tickets.iter().map(|t| t.total()).sum(),
        }
    }

    /// The pluralized count chip, e.g. `2 tiquetes`
    pub fn count_chip(&self) -> String {
        let suffix = if self.count == 1 { "" } else { "s" };
        format!("{} tiquete{}", self.count, suffix)
    }

    /// The total value chip, e.g. `Valor total $ 240.000`
    pub fn total_chip(&self) -> String {
        format!("Valor total {}", format_currency(self.total))
    }
}

/// One label/value pair of a card's details list
#[derive(Debug)]
pub struct CardDetail {
    pub label: &'static str,
    pub value: String,
}

/// Everything a single rendered ticket card shows
#[derive(Debug)]
pub struct TicketCard {
    pub ticket_id: TicketId,
    pub event_id: String,
    /// Category and event id line, e.g. `Concierto • EV-1`
    pub eyebrow: String,
    pub title: String,
    /// Date, venue and location line
    pub meta: String,
    pub price: String,
    pub tag: String,
    pub image_url: String,
    pub image_alt: String,
    pub details: Vec<CardDetail>,
    /// The text the scannable code encodes
    pub qr_payload: String,
}

/// The whole rendered ticket section for one authenticated user
#[derive(Debug)]
pub struct WalletView {
    pub greeting: String,
    pub stats: WalletStats,
    pub cards: Vec<TicketCard>,
}

#[derive(Debug, Serialize)]
struct QrPayload<'a> {
    id: TicketId,
    evento: &'a str,
    fecha: &'a str,
    localidad: &'a str,
    cliente: Option<&'a str>,
}

/// Builds the card description for one ticket. The image URL comes in
/// already resolved so this stays free of I/O.
pub fn build_card(ticket: &Ticket, event: &Event, viewer: Option<&User>, image_url: String) -> TicketCard {
    let owner = viewer
        .map(|user| user.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(&ticket.owner_login);

    let seat = ticket
        .seat_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "No numerado".to_string());

    let details = vec![
        CardDetail {
            label: "Localidad",
            value: locality_zone(&ticket.locality_id).to_string(),
        },
        CardDetail {
            label: "Estado",
            value: ticket.status.clone(),
        },
        CardDetail {
            label: "Asiento",
            value: seat,
        },
        CardDetail {
            label: "Cargo servicio",
            value: format_currency(ticket.service_fee),
        },
        CardDetail {
            label: "Cargo emisión",
            value: format_currency(ticket.issuance_fee),
        },
        CardDetail {
            label: "Propietario",
            value: owner.to_string(),
        },
    ];

    TicketCard {
        ticket_id: ticket.id,
        event_id: event.id.clone(),
        eyebrow: format!("{} • {}", event.category, event.id),
        title: event.name.clone(),
        meta: format!(
            "{} · {} ({})",
            event.date, event.venue.name, event.venue.location
        ),
        price: format!("{} + cargos", format_currency(ticket.price)),
        tag: format!("Tiquete #{}", ticket.id),
        image_url,
        image_alt: format!("Imagen del evento {}", event.name),
        details,
        qr_payload: qr_payload(ticket, event, viewer),
    }
}

/// The zone part of a composite locality id: the second `::` segment,
/// or the whole id when there is no non-empty one
pub fn locality_zone(locality_id: &str) -> &str {
    locality_id
        .split("::")
        .nth(1)
        .filter(|zone| !zone.is_empty())
        .unwrap_or(locality_id)
}

/// Serializes the structured record the scannable code carries
pub fn qr_payload(ticket: &Ticket, event: &Event, viewer: Option<&User>) -> String {
    let payload = QrPayload {
        id: ticket.id,
        evento: &event.name,
        fecha: &event.date,
        localidad: &ticket.locality_id,
        cliente: viewer.map(|user| user.login.as_str()),
    };

    serde_json::to_string(&payload).expect("payload serializes")
}
