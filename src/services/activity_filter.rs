use std::collections::BTreeSet;

use mongodb::bson::{doc, Bson, Document};

use crate::models::activity::{ActivityCategory, CandidateActivity};
use crate::services::interest_classifier::classify;

/// Selection rule handed to the activity catalog.
///
/// An activity qualifies when it belongs to `city_id`, is active, matches the
/// interest clause and fits under the price ceiling. The interest clause is
/// "category in `categories` OR any tag in `tags`" and is skipped entirely
/// when both sets are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPredicate {
    pub city_id: String,
    pub categories: BTreeSet<ActivityCategory>,
    pub tags: BTreeSet<String>,
    pub price_ceiling: Option<f64>,
}

pub fn build_predicate(
    city_id: &str,
    interests: &[String],
    budget_approx: Option<f64>,
    day_count: u32,
) -> SelectionPredicate {
    let categories = interests.iter().filter_map(|i| classify(i)).collect();
    let tags = interests.iter().map(|i| i.to_lowercase()).collect();

    // Allow activities up to twice the average daily budget.
    let price_ceiling = budget_approx.map(|budget| {
        let per_day = budget / f64::from(day_count.max(1));
        per_day * 2.0
    });

    SelectionPredicate {
        city_id: city_id.to_string(),
        categories,
        tags,
        price_ceiling,
    }
}

impl SelectionPredicate {
    fn has_interest_clause(&self) -> bool {
        !self.categories.is_empty() || !self.tags.is_empty()
    }

    /// City and active flags are not part of [`CandidateActivity`]; callers
    /// pass them from the stored document.
    pub fn matches(&self, city_id: &str, is_active: bool, activity: &CandidateActivity) -> bool {
        if city_id != self.city_id || !is_active {
            return false;
        }

        if self.has_interest_clause() {
            let category_hit = self.categories.contains(&activity.category);
            let tag_hit = activity.tags.iter().any(|t| self.tags.contains(t));
            if !category_hit && !tag_hit {
                return false;
            }
        }

        match (self.price_ceiling, activity.approx_price) {
            (Some(ceiling), Some(price)) => price <= ceiling,
            _ => true,
        }
    }

    /// Renders the predicate as a MongoDB filter over the `Activity` collection.
    pub fn to_document(&self) -> Document {
        let mut filter = doc! {
            "city_id": self.city_id.clone(),
            "is_active": true,
        };

        let mut clauses: Vec<Document> = Vec::new();

        if self.has_interest_clause() {
            let mut any_of: Vec<Document> = Vec::new();
            if !self.categories.is_empty() {
                let categories: Vec<Bson> = self
                    .categories
                    .iter()
                    .map(|c| Bson::String(c.as_str().to_string()))
                    .collect();
                any_of.push(doc! { "category": { "$in": categories } });
            }
            if !self.tags.is_empty() {
                let tags: Vec<Bson> = self.tags.iter().cloned().map(Bson::String).collect();
                any_of.push(doc! { "tags": { "$in": tags } });
            }
            clauses.push(doc! { "$or": any_of });
        }

        if let Some(ceiling) = self.price_ceiling {
            clauses.push(doc! {
                "$or": [
                    { "approx_price": { "$lte": ceiling } },
                    { "approx_price": Bson::Null },
                ]
            });
        }

        if !clauses.is_empty() {
            filter.insert("$and", clauses);
        }

        filter
    }
}
