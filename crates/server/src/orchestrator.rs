//! # Recommendation Orchestrator
//!
//! This module coordinates one recommendation request:
//! 1. Match the query against the catalog and rank neighbours
//! 2. Resolve a poster for each neighbour, one at a time
//! 3. Append the request to the activity logs
//!
//! The catalog and similarity matrix are built once at startup and shared
//! read-only behind `Arc`s; cloning the orchestrator is cheap.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::activity::ActivityLog;
use data_loader::{Catalog, ItemId};
use pipeline::{NOT_FOUND, Recommendation, SimilarityMatrix, recommend};
use poster_client::PosterResolver;

/// One recommended movie, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecommendation {
    pub rank: usize,
    pub item_id: ItemId,
    pub title: String,
    pub year: Option<u16>,
    pub genres: Vec<String>,
    pub score: f32,
    /// Poster or placeholder URL; None when posters were not requested
    pub poster_url: Option<String>,
}

/// Everything produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationReport {
    pub query: String,
    /// Title of the catalog item the query matched
    pub matched: Option<String>,
    pub recommendations: Vec<MovieRecommendation>,
}

impl RecommendationReport {
    /// Recommended titles, or the "not found" sentinel
    pub fn titles(&self) -> Vec<String> {
        if self.matched.is_none() {
            return vec![NOT_FOUND.to_string()];
        }
        self.recommendations.iter().map(|r| r.title.clone()).collect()
    }
}

/// Main orchestrator that coordinates the recommendation flow
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    catalog: Arc<Catalog>,
    matrix: Arc<SimilarityMatrix>,
    posters: Arc<PosterResolver>,
    activity: ActivityLog,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator from prebuilt parts
    ///
    /// Fails if the matrix wasn't built from this catalog.
    pub fn new(
        catalog: Arc<Catalog>,
        matrix: Arc<SimilarityMatrix>,
        posters: PosterResolver,
        activity: ActivityLog,
    ) -> Result<Self> {
        if matrix.len() != catalog.len() {
            bail!(
                "Similarity matrix has {} rows but the catalog has {} movies",
                matrix.len(),
                catalog.len()
            );
        }
        Ok(Self {
            catalog,
            matrix,
            posters: Arc::new(posters),
            activity,
        })
    }

    /// Build the similarity matrix from `catalog` and wire everything up
    pub fn from_catalog(
        catalog: Arc<Catalog>,
        posters: PosterResolver,
        activity: ActivityLog,
    ) -> Self {
        let matrix = Arc::new(SimilarityMatrix::build(catalog.items()));
        Self {
            catalog,
            matrix,
            posters: Arc::new(posters),
            activity,
        }
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Main entry point: recommendations for a title
    ///
    /// # Arguments
    /// * `title` - Free-text title query
    /// * `user_id` - When given, the pick is recorded in the user action log
    /// * `limit` - Number of recommendations to return
    /// * `with_posters` - Resolve a poster URL for each recommendation
    ///
    /// Log write failures are reported and otherwise ignored.
    pub async fn get_recommendations(
        &self,
        title: &str,
        user_id: Option<&str>,
        limit: usize,
        with_posters: bool,
    ) -> RecommendationReport {
        let start_time = Instant::now();

        let result = recommend(title, &self.catalog, &self.matrix, limit);

        let (matched, neighbors) = match &result {
            Recommendation::Matched { title, neighbors, .. } => {
                (Some(title.clone()), neighbors.as_slice())
            }
            Recommendation::NotFound => (None, &[][..]),
        };

        let mut recommendations = Vec::with_capacity(neighbors.len());
        for (rank, neighbor) in neighbors.iter().enumerate() {
            let Some(item) = self.catalog.get(neighbor.id) else {
                continue;
            };

            let poster_url = if with_posters {
                Some(self.resolve_poster(&item.title).await)
            } else {
                None
            };

            recommendations.push(MovieRecommendation {
                rank: rank + 1,
                item_id: item.id,
                title: item.title.clone(),
                year: item.year,
                genres: item.genres.clone(),
                score: neighbor.score,
                poster_url,
            });
        }

        let report = RecommendationReport {
            query: title.to_string(),
            matched,
            recommendations,
        };

        self.record(&report, user_id);

        info!(
            "Recommended {} movies for {:?} in {:.2?}",
            report.recommendations.len(),
            title,
            start_time.elapsed()
        );
        report
    }

    async fn resolve_poster(&self, title: &str) -> String {
        let outcome = self.posters.resolve(title).await;
        debug!(title = %title, outcome = ?outcome, "Poster lookup finished");
        outcome
            .url_or(&self.posters.config().placeholder_url)
            .to_string()
    }

    /// Append the request to the activity logs, best-effort
    ///
    /// A user action is only recorded when the query matched a catalog title.
    fn record(&self, report: &RecommendationReport, user_id: Option<&str>) {
        let selected = report.matched.as_deref().unwrap_or(&report.query);

        if let Err(e) = self.activity.log_recommendation(selected, &report.titles()) {
            warn!(error = %e, "Failed to write recommendation log");
        }

        let (Some(user_id), Some(matched)) = (user_id, report.matched.as_deref()) else {
            return;
        };
        if let Err(e) = self.activity.log_user_action(user_id, matched) {
            warn!(error = %e, user_id = %user_id, "Failed to write user action log");
        }
    }
}
