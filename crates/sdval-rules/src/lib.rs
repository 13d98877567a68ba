//! # sdval-rules: Type-Specific Rule-Sets
//!
//! The concrete rule-sets for the schema.org types with rich-result
//! requirements, and [`default_registry`], which maps type names to them.
//!
//! | Type(s)                                   | Rule-set(s)                                        |
//! |-------------------------------------------|----------------------------------------------------|
//! | `Article`, `BlogPosting`, `NewsArticle`   | [`ArticleRuleSet`]                                 |
//! | `BreadcrumbList`                          | [`BreadcrumbListRuleSet`]                          |
//! | `ListItem`                                | [`ListItemRuleSet`]                                |
//! | `Event`                                   | [`EventRuleSet`]                                   |
//! | `MerchantReturnPolicy`                    | [`MerchantReturnPolicyRuleSet`]                    |
//! | `Product`                                 | [`ProductRuleSet`], [`ProductMerchantRuleSet`]     |
//! | `Offer`                                   | [`OfferRuleSet`]                                   |
//! | `AggregateOffer`                          | [`AggregateOfferRuleSet`]                          |
//! | `Rating`                                  | [`RatingRuleSet`]                                  |
//! | `AggregateRating`                         | [`AggregateRatingRuleSet`]                         |
//!
//! Subtypes without an entry (`Movie`, `ProductModel`, ...) reach these
//! through vocabulary inheritance when the validator has a vocabulary.

pub mod article;
pub mod breadcrumb_list;
pub mod event;
pub mod list_item;
pub mod merchant_return_policy;
pub mod offer;
pub mod product;
pub mod product_merchant;
pub mod rating;

use std::sync::Arc;

use sdval_engine::HandlerRegistry;

pub use article::ArticleRuleSet;
pub use breadcrumb_list::BreadcrumbListRuleSet;
pub use event::EventRuleSet;
pub use list_item::ListItemRuleSet;
pub use merchant_return_policy::MerchantReturnPolicyRuleSet;
pub use offer::{AggregateOfferRuleSet, OfferRuleSet};
pub use product::ProductRuleSet;
pub use product_merchant::ProductMerchantRuleSet;
pub use rating::{AggregateRatingRuleSet, RatingRuleSet};

/// Registry with every built-in rule-set.
pub fn default_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    let article = Arc::new(ArticleRuleSet);
    for type_name in ["Article", "BlogPosting", "NewsArticle"] {
        registry.register(type_name, article.clone());
    }
    registry
        .register("AggregateOffer", Arc::new(AggregateOfferRuleSet))
        .register("AggregateRating", Arc::new(AggregateRatingRuleSet))
        .register("BreadcrumbList", Arc::new(BreadcrumbListRuleSet))
        .register("Event", Arc::new(EventRuleSet))
        .register("ListItem", Arc::new(ListItemRuleSet))
        .register("MerchantReturnPolicy", Arc::new(MerchantReturnPolicyRuleSet))
        .register("Offer", Arc::new(OfferRuleSet))
        .register("Product", Arc::new(ProductRuleSet))
        .register("Product", Arc::new(ProductMerchantRuleSet))
        .register("Rating", Arc::new(RatingRuleSet));
    registry
}
