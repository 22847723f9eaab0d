use std::sync::Arc;

use crate::store::{KeyValueStore, Result};
use crate::Event;

/// Shown when neither an override nor the event itself provides an image
pub const DEFAULT_EVENT_IMAGE: &str =
    "https://images.unsplash.com/photo-1521336575822-6da63fb45455?auto=format&fit=crop&w=1200&q=80";

/// User-chosen replacement images for events, persisted in the local
/// key-value store under `event-image-<idEvento>`
pub struct ImageOverrides<S> {
    store: Arc<S>,
}

fn key_for(event_id: &str) -> String {
    format!("event-image-{}", event_id)
}

impl<S> ImageOverrides<S>
where
    S: KeyValueStore,
{
    pub fn new(store: &Arc<S>) -> Self {
        Self {
            store: store.clone(),
        }
    }

    /// Resolves the image to display for an event: the stored override
    /// first, then the event's own image, then the fixed default
    pub async fn resolve(&self, event: &Event) -> Result<String> {
        if let Some(stored) = self.saved(&event.id).await? {
            return Ok(stored);
        }

        let own = event
            .image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_EVENT_IMAGE);

        Ok(own.to_string())
    }

    /// Returns the saved override for an event, if there is a
    /// non-empty one
    pub async fn saved(&self, event_id: &str) -> Result<Option<String>> {
        let stored = self.store.get(&key_for(event_id)).await?;

        Ok(stored.filter(|url| !url.is_empty()))
    }

    /// Saves an override for an event. The URL is trimmed first, and
    /// an empty result is a no-op. Returns whether a write happened.
    /// The URL is not validated in any way.
    pub async fn set(&self, event_id: &str, url: &str) -> Result<bool> {
        let url = url.trim();

        if url.is_empty() {
            return Ok(false);
        }

        self.store.put(&key_for(event_id), url).await?;
        log::info!("image override saved for event {}", event_id);

        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::Venue;
    use crate::store::MemoryStore;

    fn event(id: &str, image_url: Option<&str>) -> Event {
        Event {
            id: id.to_string(),
            name: "Concierto Los Alpes".to_string(),
            category: "Concierto".to_string(),
            date: "2025-11-20".to_string(),
            venue: Venue {
                name: "Movistar Arena".to_string(),
                location: "Bogotá".to_string(),
            },
            image_url: image_url.map(str::to_string),
        }
    }

    fn overrides() -> ImageOverrides<MemoryStore> {
        ImageOverrides::new(&Arc::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn resolution_prefers_override_then_event_then_default() {
        let overrides = overrides();
        let with_image = event("EV-1", Some("https://example.com/own.jpg"));
        let without_image = event("EV-2", None);

        assert_eq!(
            overrides.resolve(&with_image).await.unwrap(),
            "https://example.com/own.jpg"
        );
        assert_eq!(
            overrides.resolve(&without_image).await.unwrap(),
            DEFAULT_EVENT_IMAGE
        );

        overrides.set("EV-1", "https://example.com/mine.jpg").await.unwrap();
        assert_eq!(
            overrides.resolve(&with_image).await.unwrap(),
            "https://example.com/mine.jpg"
        );
    }

    #[tokio::test]
    async fn empty_event_image_falls_through_to_default() {
        let overrides = overrides();

        assert_eq!(
            overrides.resolve(&event("EV-1", Some(""))).await.unwrap(),
            DEFAULT_EVENT_IMAGE
        );
    }

    #[tokio::test]
    async fn resolution_is_idempotent() {
        let overrides = overrides();
        let event = event("EV-1", None);

        let first = overrides.resolve(&event).await.unwrap();
        let second = overrides.resolve(&event).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn override_only_affects_its_own_event() {
        let overrides = overrides();
        let one = event("EV-1", Some("https://example.com/one.jpg"));
        let two = event("EV-2", Some("https://example.com/two.jpg"));

        overrides.set("EV-1", "https://example.com/mine.jpg").await.unwrap();

        assert_eq!(
            overrides.resolve(&one).await.unwrap(),
            "https://example.com/mine.jpg"
        );
        assert_eq!(
            overrides.resolve(&two).await.unwrap(),
            "https://example.com/two.jpg"
        );
    }

    #[tokio::test]
    async fn urls_are_trimmed_and_blank_submissions_ignored() {
        let overrides = overrides();

        assert!(!overrides.set("EV-1", "   ").await.unwrap());
        assert_eq!(overrides.saved("EV-1").await.unwrap(), None);

        assert!(overrides.set("EV-1", "  https://example.com/a.jpg  ").await.unwrap());
        assert_eq!(
            overrides.saved("EV-1").await.unwrap().as_deref(),
            Some("https://example.com/a.jpg")
        );
    }
}
