//! Request types for the twelve Products operations.

use super::{put_bool, put_list, put_optional, with_action, Action, Operation};
use crate::signing::ParameterSet;

/// `SellerId` and `MWSAuthToken`, when present.
fn put_seller_fields(
    parameters: &mut ParameterSet,
    seller_id: &Option<String>,
    mws_auth_token: &Option<String>,
) {
    put_optional(parameters, "SellerId", seller_id);
    put_optional(parameters, "MWSAuthToken", mws_auth_token);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCompetitivePricingForAsinRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub asin_list: Vec<String>,
}

impl Operation for GetCompetitivePricingForAsinRequest {
    fn action(&self) -> Action {
        Action::GetCompetitivePricingForAsin
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_list(&mut parameters, "ASINList", "ASIN", &self.asin_list);
        parameters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCompetitivePricingForSkuRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub seller_sku_list: Vec<String>,
}

impl Operation for GetCompetitivePricingForSkuRequest {
    fn action(&self) -> Action {
        Action::GetCompetitivePricingForSku
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_list(&mut parameters, "SellerSKUList", "SellerSKU", &self.seller_sku_list);
        parameters
    }
}

/// Lowest-priced offers for up to twenty ASINs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLowestOfferListingsForAsinRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub asin_list: Vec<String>,
    /// `Any`, `New`, `Used`, `Collectible` or `Refurbished`
    pub item_condition: Option<String>,
    pub exclude_me: Option<bool>,
}

impl Operation for GetLowestOfferListingsForAsinRequest {
    fn action(&self) -> Action {
        Action::GetLowestOfferListingsForAsin
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_list(&mut parameters, "ASINList", "ASIN", &self.asin_list);
        put_optional(&mut parameters, "ItemCondition", &self.item_condition);
        put_bool(&mut parameters, "ExcludeMe", self.exclude_me);
        parameters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLowestOfferListingsForSkuRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub seller_sku_list: Vec<String>,
    pub item_condition: Option<String>,
    pub exclude_me: Option<bool>,
}

impl Operation for GetLowestOfferListingsForSkuRequest {
    fn action(&self) -> Action {
        Action::GetLowestOfferListingsForSku
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_list(&mut parameters, "SellerSKUList", "SellerSKU", &self.seller_sku_list);
        put_optional(&mut parameters, "ItemCondition", &self.item_condition);
        put_bool(&mut parameters, "ExcludeMe", self.exclude_me);
        parameters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetMatchingProductRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub asin_list: Vec<String>,
}

impl Operation for GetMatchingProductRequest {
    fn action(&self) -> Action {
        Action::GetMatchingProduct
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_list(&mut parameters, "ASINList", "ASIN", &self.asin_list);
        parameters
    }
}

/// Products matching a list of identifiers of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetMatchingProductForIdRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    /// `ASIN`, `GCID`, `SellerSKU`, `UPC`, `EAN`, `ISBN` or `JAN`
    pub id_type: Option<String>,
    pub id_list: Vec<String>,
}

impl Operation for GetMatchingProductForIdRequest {
    fn action(&self) -> Action {
        Action::GetMatchingProductForId
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_optional(&mut parameters, "IdType", &self.id_type);
        put_list(&mut parameters, "IdList", "Id", &self.id_list);
        parameters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetMyPriceForAsinRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub asin_list: Vec<String>,
}

impl Operation for GetMyPriceForAsinRequest {
    fn action(&self) -> Action {
        Action::GetMyPriceForAsin
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_list(&mut parameters, "ASINList", "ASIN", &self.asin_list);
        parameters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetMyPriceForSkuRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub seller_sku_list: Vec<String>,
}

impl Operation for GetMyPriceForSkuRequest {
    fn action(&self) -> Action {
        Action::GetMyPriceForSku
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_list(&mut parameters, "SellerSKUList", "SellerSKU", &self.seller_sku_list);
        parameters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetProductCategoriesForAsinRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub asin: Option<String>,
}

impl Operation for GetProductCategoriesForAsinRequest {
    fn action(&self) -> Action {
        Action::GetProductCategoriesForAsin
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_optional(&mut parameters, "ASIN", &self.asin);
        parameters
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetProductCategoriesForSkuRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub seller_sku: Option<String>,
}

impl Operation for GetProductCategoriesForSkuRequest {
    fn action(&self) -> Action {
        Action::GetProductCategoriesForSku
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_optional(&mut parameters, "SellerSKU", &self.seller_sku);
        parameters
    }
}

/// Operational status of the Products API. Takes no marketplace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetServiceStatusRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
}

impl Operation for GetServiceStatusRequest {
    fn action(&self) -> Action {
        Action::GetServiceStatus
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        parameters
    }
}

/// Free-text product search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMatchingProductsRequest {
    pub seller_id: Option<String>,
    pub mws_auth_token: Option<String>,
    pub marketplace_id: Option<String>,
    pub query: Option<String>,
    pub query_context_id: Option<String>,
}

impl Operation for ListMatchingProductsRequest {
    fn action(&self) -> Action {
        Action::ListMatchingProducts
    }

    fn to_parameter_set(&self) -> ParameterSet {
        let mut parameters = with_action(self.action());
        put_seller_fields(&mut parameters, &self.seller_id, &self.mws_auth_token);
        put_optional(&mut parameters, "MarketplaceId", &self.marketplace_id);
        put_optional(&mut parameters, "Query", &self.query);
        put_optional(&mut parameters, "QueryContextId", &self.query_context_id);
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(parameters: &ParameterSet) -> Vec<&str> {
        parameters.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_get_service_status_minimal() {
        let parameters = GetServiceStatusRequest::default().to_parameter_set();
        assert_eq!(names(&parameters), vec!["Action"]);
        assert_eq!(parameters.get("Action"), Some("GetServiceStatus"));
    }

    #[test]
    fn test_get_service_status_ignores_marketplace() {
        let request = GetServiceStatusRequest {
            seller_id: Some("S1".into()),
            mws_auth_token: Some("amzn.mws.token".into()),
        };
        let parameters = request.to_parameter_set();
        assert_eq!(
            names(&parameters),
            vec!["Action", "MWSAuthToken", "SellerId"]
        );
    }

    #[test]
    fn test_lowest_offer_listings_for_asin() {
        let request = GetLowestOfferListingsForAsinRequest {
            seller_id: Some("S1".into()),
            marketplace_id: Some("ATVPDKIKX0DER".into()),
            asin_list: vec!["B000001".into(), "B000002".into()],
            item_condition: Some("New".into()),
            exclude_me: Some(true),
            ..Default::default()
        };
        let parameters = request.to_parameter_set();
        assert_eq!(
            parameters.get("Action"),
            Some("GetLowestOfferListingsForASIN")
        );
        assert_eq!(parameters.get("ASINList.ASIN.1"), Some("B000001"));
        assert_eq!(parameters.get("ASINList.ASIN.2"), Some("B000002"));
        assert_eq!(parameters.get("ItemCondition"), Some("New"));
        assert_eq!(parameters.get("ExcludeMe"), Some("true"));
        assert_eq!(parameters.get("MarketplaceId"), Some("ATVPDKIKX0DER"));
        assert!(!parameters.contains("MWSAuthToken"));
    }

    #[test]
    fn test_sku_lists_and_id_lists() {
        let sku = GetMyPriceForSkuRequest {
            seller_sku_list: vec!["SKU-1".into()],
            ..Default::default()
        }
        .to_parameter_set();
        assert_eq!(sku.get("SellerSKUList.SellerSKU.1"), Some("SKU-1"));

        let ids = GetMatchingProductForIdRequest {
            id_type: Some("UPC".into()),
            id_list: vec!["012345678905".into(), "036000291452".into()],
            ..Default::default()
        }
        .to_parameter_set();
        assert_eq!(ids.get("IdType"), Some("UPC"));
        assert_eq!(ids.get("IdList.Id.2"), Some("036000291452"));
    }

    #[test]
    fn test_single_value_operations() {
        let asin = GetProductCategoriesForAsinRequest {
            asin: Some("B00TEST".into()),
            ..Default::default()
        }
        .to_parameter_set();
        assert_eq!(asin.get("ASIN"), Some("B00TEST"));

        let sku = GetProductCategoriesForSkuRequest {
            seller_sku: Some("SKU-9".into()),
            ..Default::default()
        }
        .to_parameter_set();
        assert_eq!(sku.get("SellerSKU"), Some("SKU-9"));
        assert_eq!(sku.get("Action"), Some("GetProductCategoriesForSKU"));
    }

    #[test]
    fn test_list_matching_products() {
        let parameters = ListMatchingProductsRequest {
            marketplace_id: Some("ATVPDKIKX0DER".into()),
            query: Some("rust programming".into()),
            query_context_id: Some("Books".into()),
            ..Default::default()
        }
        .to_parameter_set();
        assert_eq!(parameters.get("Query"), Some("rust programming"));
        assert_eq!(parameters.get("QueryContextId"), Some("Books"));
        assert_eq!(
            parameters.canonical_query_string(),
            "Action=ListMatchingProducts&MarketplaceId=ATVPDKIKX0DER\
             &Query=rust%20programming&QueryContextId=Books"
        );
    }

    #[test]
    fn test_every_operation_sets_its_action() {
        let requests: Vec<Box<dyn Operation>> = vec![
            Box::new(GetCompetitivePricingForAsinRequest::default()),
            Box::new(GetCompetitivePricingForSkuRequest::default()),
            Box::new(GetLowestOfferListingsForAsinRequest::default()),
            Box::new(GetLowestOfferListingsForSkuRequest::default()),
            Box::new(GetMatchingProductRequest::default()),
            Box::new(GetMatchingProductForIdRequest::default()),
            Box::new(GetMyPriceForAsinRequest::default()),
            Box::new(GetMyPriceForSkuRequest::default()),
            Box::new(GetProductCategoriesForAsinRequest::default()),
            Box::new(GetProductCategoriesForSkuRequest::default()),
            Box::new(GetServiceStatusRequest::default()),
            Box::new(ListMatchingProductsRequest::default()),
        ];
        for request in requests {
            let parameters = request.to_parameter_set();
            assert_eq!(parameters.get("Action"), Some(request.action().as_ref()));
        }
    }
}
