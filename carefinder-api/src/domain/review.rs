use std::collections::HashMap;

use serde::Serialize;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::ProviderType;

const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: u64,
    pub provider_name: String,
    pub rating: f64,
    pub review_text: String,
    pub date: String,
}

/// Append-only in-memory review store, partitioned by provider type.
#[derive(Default)]
pub struct ReviewStore {
    reviews: RwLock<HashMap<ProviderType, Vec<Review>>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(
        &self,
        provider_type: ProviderType,
        provider_name: String,
        rating: f64,
        review_text: String,
    ) -> Review {
        let mut reviews = self.reviews.write().await;
        let partition = reviews.entry(provider_type).or_default();

        let date = OffsetDateTime::now_utc()
            .format(DATE_FORMAT)
            .unwrap_or_default();
        let review = Review {
            id: partition.len() as u64 + 1,
            provider_name,
            rating,
            review_text,
            date,
        };
        partition.push(review.clone());
        review
    }

    pub async fn list(&self, provider_type: ProviderType) -> Vec<Review> {
        let reviews = self.reviews.read().await;
        reviews.get(&provider_type).cloned().unwrap_or_default()
    }

    /// Average healthcare-review rating for a provider, rounded to two
    /// decimals. `None` when the provider has no reviews.
    pub async fn average_rating(&self, provider_name: &str) -> Option<f64> {
        let reviews = self.reviews.read().await;
        let scores: Vec<f64> = reviews
            .get(&ProviderType::Healthcare)
            .map(|partition| {
                partition
                    .iter()
                    .filter(|r| r.provider_name == provider_name)
                    .map(|r| r.rating)
                    .collect()
            })
            .unwrap_or_default();

        if scores.is_empty() {
            return None;
        }
        let avg = scores.iter().sum::<f64>() / scores.len() as f64;
        Some((avg * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_increment_per_partition() {
        let store = ReviewStore::new();

        let first = store
            .submit(
                ProviderType::Healthcare,
                "Baptist Health".to_string(),
                5.0,
                "Great care".to_string(),
            )
            .await;
        let second = store
            .submit(
                ProviderType::Healthcare,
                "Baptist Health".to_string(),
                4.0,
                "Long wait".to_string(),
            )
            .await;
        let insurance = store
            .submit(
                ProviderType::Insurance,
                "Florida Blue".to_string(),
                3.0,
                "Fine".to_string(),
            )
            .await;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(insurance.id, 1);
        assert_eq!(store.list(ProviderType::Healthcare).await.len(), 2);
    }

    #[tokio::test]
    async fn average_rating_covers_matching_reviews_only() {
        let store = ReviewStore::new();
        store
            .submit(
                ProviderType::Healthcare,
                "Baptist Health".to_string(),
                5.0,
                "a".to_string(),
            )
            .await;
        store
            .submit(
                ProviderType::Healthcare,
                "Baptist Health".to_string(),
                4.0,
                "b".to_string(),
            )
            .await;
        store
            .submit(
                ProviderType::Healthcare,
                "Aventura Hospital".to_string(),
                1.0,
                "c".to_string(),
            )
            .await;

        assert_eq!(store.average_rating("Baptist Health").await, Some(4.5));
        assert_eq!(store.average_rating("Mercy Hospital").await, None);
    }
}
