use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod data;
pub use data::*;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A source could not be fetched over HTTP
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// A file source could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A source did not contain the expected JSON document
    #[error("malformed document at {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a single catalog document comes from
#[derive(Debug, Clone)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

/// The three documents that make up a catalog
#[derive(Debug, Clone)]
pub struct CatalogSources {
    pub users: DataSource,
    pub tickets: DataSource,
    pub events: DataSource,
}

impl CatalogSources {
    /// Derives the three conventional document names from a base
    /// directory or base URL
    pub fn from_base(base: &str) -> Self {
        let join = |name: &str| match DataSource::parse(base) {
            DataSource::Url(url) => {
                DataSource::Url(format!("{}/{}", url.trim_end_matches('/'), name))
            }
            DataSource::File(path) => DataSource::File(path.join(name)),
        };

        Self {
            users: join("usuarios.json"),
            tickets: join("tiquetes.json"),
            events: join("eventos.json"),
        }
    }
}

/// The static collections every render works from
#[derive(Debug)]
pub struct Catalog {
    pub users: Vec<User>,
    pub tickets: Vec<Ticket>,
    pub events: Vec<Event>,
}

impl Catalog {
    /// Returns the first event with the given id, if any
    pub fn event_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Returns the tickets owned by the user, in collection order
    pub fn tickets_of(&self, user: &User) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| user.ticket_ids.contains(&t.id))
            .collect()
    }
}

/// Loads the three catalog documents, at most once per process.
/// All three fetches run concurrently, and a failure in any of them
/// fails the whole load without caching partial state.
pub struct CatalogLoader {
    sources: CatalogSources,
    http: reqwest::Client,
    cache: Mutex<Option<Arc<Catalog>>>,
}

impl CatalogLoader {
    pub fn new(sources: CatalogSources) -> Self {
        Self {
            sources,
            http: reqwest::Client::new(),
            cache: Mutex::new(None),
        }
    }

    /// Returns the catalog, fetching it on the first call.
    /// Subsequent calls return the cached collections.
    pub async fn load(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.cache.lock().clone() {
            return Ok(catalog);
        }

        let (users, tickets, events) = tokio::try_join!(
            self.fetch::<UserDocument>(&self.sources.users),
            self.fetch::<Vec<Ticket>>(&self.sources.tickets),
            self.fetch::<Vec<Event>>(&self.sources.events),
        )?;

        let catalog = Arc::new(Catalog {
            users: users.clientes,
            tickets,
            events,
        });

        *self.cache.lock() = Some(catalog.clone());
        log::info!("catalog loaded");

        Ok(catalog)
    }

    async fn fetch<T>(&self, source: &DataSource) -> Result<T>
    where
        T: DeserializeOwned,
    {
        match source {
            DataSource::Url(url) => {
                let response = self.http.get(url).send().await?.error_for_status()?;
                Ok(response.json().await?)
            }
            DataSource::File(path) => {
                let raw =
                    tokio::fs::read_to_string(path)
                        .await
                        .map_err(|source| CatalogError::Io {
                            path: path.display().to_string(),
                            source,
                        })?;

                serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
                    path: path.display().to_string(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn catalog_from_json(users: &str, tickets: &str, events: &str) -> Catalog {
        let users: UserDocument = serde_json::from_str(users).unwrap();

        Catalog {
            users: users.clientes,
            tickets: serde_json::from_str(tickets).unwrap(),
            events: serde_json::from_str(events).unwrap(),
        }
    }

    fn sample() -> Catalog {
        catalog_from_json(
            r#"{ "clientes": [
                { "login": "ana", "password": "1234", "nombre": "Ana María", "tiquetes": [101, 103] }
            ] }"#,
            r#"[
                { "idTiquete": 101, "propietarioLogin": "ana", "eventoId": "EV-1",
                  "idLocalidad": "EV-1::Platea", "estado": "Vendido", "numeroAsiento": 12,
                  "precio": 120000, "cargoServicio": 18000, "cargoEmision": 5000 },
                { "idTiquete": 102, "propietarioLogin": "luis", "eventoId": "EV-1",
                  "idLocalidad": "EV-1::General", "estado": "Vendido", "numeroAsiento": null,
                  "precio": 80000, "cargoServicio": 12000, "cargoEmision": 5000 },
                { "idTiquete": 103, "propietarioLogin": "ana", "eventoId": "EV-2",
                  "idLocalidad": "EV-2::General", "estado": "Reservado",
                  "precio": 95000, "cargoServicio": 14250, "cargoEmision": 5000 }
            ]"#,
            r#"[
                { "idEvento": "EV-1", "nombre": "Concierto Los Alpes", "tipoEvento": "Concierto",
                  "fecha": "2025-11-20", "venue": { "nombre": "Movistar Arena", "ubicacion": "Bogotá" },
                  "imagenUrl": "https://example.com/alpes.jpg" },
                { "idEvento": "EV-2", "nombre": "Festival Andino", "tipoEvento": "Festival",
                  "fecha": "2025-12-05", "venue": { "nombre": "Parque Simón Bolívar", "ubicacion": "Bogotá" },
                  "imagenUrl": null }
            ]"#,
        )
    }

    #[test]
    fn documents_parse_with_original_field_names() {
        let catalog = sample();

        assert_eq!(catalog.users[0].name, "Ana María");
        assert_eq!(catalog.users[0].ticket_ids, vec![101, 103]);
        assert_eq!(catalog.tickets[0].locality_id, "EV-1::Platea");
        assert_eq!(catalog.tickets[1].seat_number, None);
        assert_eq!(catalog.tickets[2].seat_number, None);
        assert_eq!(catalog.events[0].venue.location, "Bogotá");
        assert_eq!(catalog.events[1].image_url, None);
    }

    #[test]
    fn tickets_of_intersects_owned_ids_with_collection() {
        let catalog = sample();
        let ana = &catalog.users[0];

        let tickets = catalog.tickets_of(ana);
        let ids: Vec<_> = tickets.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![101, 103]);
    }

    #[test]
    fn tickets_of_ignores_owned_ids_missing_from_collection() {
        let mut catalog = sample();
        catalog.users[0].ticket_ids.push(999);

        assert_eq!(catalog.tickets_of(&catalog.users[0]).len(), 2);
    }

    #[test]
    fn event_lookup_by_id() {
        let catalog = sample();

        assert_eq!(catalog.event_by_id("EV-2").unwrap().name, "Festival Andino");
        assert!(catalog.event_by_id("EV-9").is_none());
    }

    #[test]
    fn ticket_total_sums_all_three_components() {
        let catalog = sample();

        assert_eq!(catalog.tickets[0].total(), 143000.0);
    }

    #[tokio::test]
    async fn failed_load_caches_nothing() {
        let loader = CatalogLoader::new(CatalogSources::from_base("no-such-directory"));

        assert!(loader.load().await.is_err());
        assert!(loader.cache.lock().is_none());
    }

    #[test]
    fn sources_join_base_urls_and_directories() {
        let urls = CatalogSources::from_base("https://example.com/data/");
        let files = CatalogSources::from_base("data");

        assert!(
            matches!(urls.users, DataSource::Url(ref u) if u == "https://example.com/data/usuarios.json")
        );
        assert!(
            matches!(files.events, DataSource::File(ref p) if p == &PathBuf::from("data/eventos.json"))
        );
    }
}
