//! Products API operations.
//!
//! Each request type flattens itself into a [`ParameterSet`]:
//! - `Action` is always set
//! - optional fields are copied only when present
//! - lists are expanded as `ListName.ItemName.<n>` with 1-based indices
//! - booleans are rendered as `"true"` / `"false"`

mod requests;

use strum_macros::{AsRefStr, Display as DisplayMacro, EnumIter as EnumIterMacro, EnumString};

use crate::signing::ParameterSet;

pub use requests::{
    GetCompetitivePricingForAsinRequest, GetCompetitivePricingForSkuRequest,
    GetLowestOfferListingsForAsinRequest, GetLowestOfferListingsForSkuRequest,
    GetMatchingProductForIdRequest, GetMatchingProductRequest, GetMyPriceForAsinRequest,
    GetMyPriceForSkuRequest, GetProductCategoriesForAsinRequest,
    GetProductCategoriesForSkuRequest, GetServiceStatusRequest, ListMatchingProductsRequest,
};

/// Name of the `Action` parameter.
pub const PARAM_ACTION: &str = "Action";

/// The Products API operations, named exactly as the `Action` parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, DisplayMacro, EnumIterMacro,
)]
pub enum Action {
    #[strum(serialize = "GetCompetitivePricingForASIN")]
    GetCompetitivePricingForAsin,
    #[strum(serialize = "GetCompetitivePricingForSKU")]
    GetCompetitivePricingForSku,
    #[strum(serialize = "GetLowestOfferListingsForASIN")]
    GetLowestOfferListingsForAsin,
    #[strum(serialize = "GetLowestOfferListingsForSKU")]
    GetLowestOfferListingsForSku,
    GetMatchingProduct,
    GetMatchingProductForId,
    #[strum(serialize = "GetMyPriceForASIN")]
    GetMyPriceForAsin,
    #[strum(serialize = "GetMyPriceForSKU")]
    GetMyPriceForSku,
    #[strum(serialize = "GetProductCategoriesForASIN")]
    GetProductCategoriesForAsin,
    #[strum(serialize = "GetProductCategoriesForSKU")]
    GetProductCategoriesForSku,
    GetServiceStatus,
    ListMatchingProducts,
}

/// A request that can be sent with [`crate::MwsClient::invoke`].
pub trait Operation {
    /// The operation this request performs.
    fn action(&self) -> Action;

    /// Flattens the request into wire parameters, `Action` included.
    fn to_parameter_set(&self) -> ParameterSet;
}

/// Starts a parameter set with `Action` filled in.
pub(crate) fn with_action(action: Action) -> ParameterSet {
    let mut parameters = ParameterSet::new();
    parameters.insert(PARAM_ACTION, action.as_ref());
    parameters
}

pub(crate) fn put_optional(parameters: &mut ParameterSet, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        parameters.insert(name, value.as_str());
    }
}

pub(crate) fn put_bool(parameters: &mut ParameterSet, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        parameters.insert(name, if value { "true" } else { "false" });
    }
}

pub(crate) fn put_list(parameters: &mut ParameterSet, list: &str, item: &str, values: &[String]) {
    for (index, value) in values.iter().enumerate() {
        parameters.insert(format!("{}.{}.{}", list, item, index + 1), value.as_str());
    }
}
