use serde::Deserialize;

/// The type used for ticket identifiers in the catalog.
pub type TicketId = u32;

/// A BoletaMaster account, as it appears in the user document
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    /// Stored and compared in plaintext, matching the source data
    pub password: String,
    /// The user's display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Identifiers of the tickets this user owns
    #[serde(rename = "tiquetes")]
    pub ticket_ids: Vec<TicketId>,
}

/// A purchased admission record tied to one event and one owner
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    #[serde(rename = "idTiquete")]
    pub id: TicketId,
    /// Login of the owning user
    #[serde(rename = "propietarioLogin")]
    pub owner_login: String,
    #[serde(rename = "eventoId")]
    pub event_id: String,
    /// Composite locality identifier, encoded as `<event>::<zone>`
    #[serde(rename = "idLocalidad")]
    pub locality_id: String,
    #[serde(rename = "estado")]
    pub status: String,
    /// Seat number, if the locality is numbered
    #[serde(rename = "numeroAsiento")]
    pub seat_number: Option<u32>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "cargoServicio")]
    pub service_fee: f64,
    #[serde(rename = "cargoEmision")]
    pub issuance_fee: f64,
}

impl Ticket {
    /// The full amount paid for this ticket: base price plus both fees
    pub fn total(&self) -> f64 {
        self.price + self.service_fee + self.issuance_fee
    }
}

/// An event that tickets are sold for
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "idEvento")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Category of the event, such as "Concierto" or "Deportivo"
    #[serde(rename = "tipoEvento")]
    pub category: String,
    #[serde(rename = "fecha")]
    pub date: String,
    pub venue: Venue,
    /// Promotional image, if the event has one
    #[serde(rename = "imagenUrl")]
    pub image_url: Option<String>,
}

/// Where an event takes place
#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
}

/// The shape of the user document, which wraps its list in an object
#[derive(Debug, Deserialize)]
pub struct UserDocument {
    pub clientes: Vec<User>,
}
