//! GraphQL API definitions.

pub mod booking;
mod mutation;
pub mod pricing_rule;
pub mod property;
mod query;
pub mod scalar;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    booking::Booking, mutation::Mutation, pricing_rule::PricingRule,
    property::Property, query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

#[cfg(test)]
mod spec {
    use juniper::{
        graphql_value, DefaultScalarValue, EmptySubscription, ExecutionError,
        RootNode, Value, Variables,
    };
    use service::infra::Memory;

    use crate::{Context, Service};

    use super::{Mutation, Query};

    fn context() -> Context {
        Context::new(Service::new(Memory::new()))
    }

    async fn execute(
        ctx: &Context,
        doc: &str,
    ) -> (Value, Vec<ExecutionError<DefaultScalarValue>>) {
        let schema =
            RootNode::new(Query, Mutation, EmptySubscription::<Context>::new());
        juniper::execute(doc, None, &schema, &Variables::new(), ctx)
            .await
            .unwrap()
    }

    fn field<'v>(value: &'v Value, path: &[&str]) -> &'v Value {
        path.iter().fold(value, |v, name| {
            v.as_object_value()
                .and_then(|o| o.get_field_value(*name))
                .unwrap_or_else(|| panic!("missing `{name}` field in {v}"))
        })
    }

    fn string(value: &Value, path: &[&str]) -> String {
        field(value, path).as_string_value().unwrap().to_owned()
    }

    fn error_code(errs: &[ExecutionError<DefaultScalarValue>]) -> &Value {
        assert_eq!(errs.len(), 1, "expected single error: {errs:?}");
        errs[0]
            .error()
            .extensions()
            .as_object_value()
            .and_then(|o| o.get_field_value("code"))
            .unwrap()
    }

    async fn create_property(ctx: &Context, base_price: &str) -> String {
        let (res, errs) = execute(
            ctx,
            &format!(
                r#"mutation {{
                    createProperty(name: "Beach House", basePrice: "{base_price}") {{
                        id
                    }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        string(&res, &["createProperty", "id"])
    }

    #[tokio::test]
    async fn books_property_with_rules() {
        let ctx = context();
        let id = create_property(&ctx, "10").await;

        let (_, errs) = execute(
            &ctx,
            &format!(
                r#"mutation {{
                    createPricingRule(
                        propertyId: "{id}",
                        minStayLength: 7,
                        priceModifier: "-10",
                    ) {{ id }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        let (res, errs) = execute(
            &ctx,
            &format!(
                r#"mutation {{
                    createPricingRule(
                        propertyId: "{id}",
                        specificDay: "01-04-2022",
                        fixedPrice: "20",
                    ) {{ kind specificDay fixedPrice minStayLength }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            field(&res, &["createPricingRule"]),
            &graphql_value!({
                "kind": "SPECIFIC_DAY",
                "specificDay": "01-04-2022",
                "fixedPrice": "20",
                "minStayLength": None,
            }),
        );

        let (res, errs) = execute(
            &ctx,
            &format!(
                r#"mutation {{
                    createBooking(
                        propertyId: "{id}",
                        startDate: "01-01-2022",
                        endDate: "01-10-2022",
                    ) {{
                        startDate
                        endDate
                        stayLength
                        finalPrice
                        property {{ name }}
                    }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            field(&res, &["createBooking"]),
            &graphql_value!({
                "startDate": "01-01-2022",
                "endDate": "01-10-2022",
                "stayLength": 10,
                "finalPrice": "101",
                "property": {"name": "Beach House"},
            }),
        );
    }

    #[tokio::test]
    async fn lists_property_relations() {
        let ctx = context();
        let id = create_property(&ctx, "12").await;
        let other = create_property(&ctx, "50").await;

        for property_id in [&id, &other] {
            let (_, errs) = execute(
                &ctx,
                &format!(
                    r#"mutation {{
                        createPricingRule(
                            propertyId: "{property_id}",
                            minStayLength: 3,
                            priceModifier: "10",
                        ) {{ id }}
                    }}"#,
                ),
            )
            .await;
            assert!(errs.is_empty(), "{errs:?}");
        }
        let (_, errs) = execute(
            &ctx,
            &format!(
                r#"mutation {{
                    createBooking(
                        propertyId: "{id}",
                        startDate: "03-01-2022",
                        endDate: "03-03-2022",
                    ) {{ id }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");

        let (res, errs) = execute(
            &ctx,
            &format!(
                r#"{{
                    property(id: "{id}") {{
                        basePrice
                        pricingRules {{ kind minStayLength priceModifier }}
                        bookings {{ stayLength finalPrice }}
                    }}
                    pricingRules {{ id }}
                    ofProperty: pricingRules(propertyId: "{id}") {{ id }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            field(&res, &["property"]),
            &graphql_value!({
                "basePrice": "12",
                "pricingRules": [{
                    "kind": "THRESHOLD",
                    "minStayLength": 3,
                    "priceModifier": "10",
                }],
                "bookings": [{"stayLength": 3, "finalPrice": "39.6"}],
            }),
        );
        assert_eq!(
            field(&res, &["pricingRules"]).as_list_value().unwrap().len(),
            2,
        );
        assert_eq!(
            field(&res, &["ofProperty"]).as_list_value().unwrap().len(),
            1,
        );
    }

    #[tokio::test]
    async fn reports_missing_property() {
        let ctx = context();

        let (res, errs) = execute(
            &ctx,
            r#"{
                property(id: "5f3c2a3e-9d0b-4c1e-8f7a-2b6d4e1c9a00") { name }
            }"#,
        )
        .await;

        assert_eq!(res, graphql_value!(None));
        assert_eq!(error_code(&errs), &graphql_value!("PROPERTY_NOT_EXISTS"));
        assert_eq!(ctx.error_status_code(), http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_reversed_dates() {
        let ctx = context();
        let id = create_property(&ctx, "10").await;

        let (_, errs) = execute(
            &ctx,
            &format!(
                r#"mutation {{
                    createBooking(
                        propertyId: "{id}",
                        startDate: "01-10-2022",
                        endDate: "01-01-2022",
                    ) {{ id }}
                }}"#,
            ),
        )
        .await;

        assert_eq!(error_code(&errs), &graphql_value!("INVALID_DATE_RANGE"));
        assert_eq!(ctx.error_status_code(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_overflowing_price() {
        let ctx = context();
        let id = create_property(&ctx, "79228162514264337593543950335").await;

        let (res, errs) = execute(
            &ctx,
            &format!(
                r#"mutation {{
                    createBooking(
                        propertyId: "{id}",
                        startDate: "01-01-2022",
                        endDate: "01-02-2022",
                    ) {{ id }}
                }}"#,
            ),
        )
        .await;

        assert_eq!(res, graphql_value!(None));
        assert_eq!(error_code(&errs), &graphql_value!("PRICE_OVERFLOW"));
        assert_eq!(ctx.error_status_code(), http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_property_removes_its_rules() {
        let ctx = context();
        let id = create_property(&ctx, "10").await;
        let (_, errs) = execute(
            &ctx,
            &format!(
                r#"mutation {{
                    createPricingRule(
                        propertyId: "{id}",
                        minStayLength: 2,
                        priceModifier: "-5",
                    ) {{ id }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");

        let (res, errs) = execute(
            &ctx,
            &format!(r#"mutation {{ deleteProperty(id: "{id}") {{ name }} }}"#),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            string(&res, &["deleteProperty", "name"]),
            "Beach House",
        );

        let (res, errs) =
            execute(&ctx, "{ properties { id } pricingRules { id } }").await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({"properties": [], "pricingRules": []}),
        );
    }

    #[tokio::test]
    async fn rejects_malformed_date() {
        let ctx = context();
        let id = create_property(&ctx, "10").await;
        let schema =
            RootNode::new(Query, Mutation, EmptySubscription::<Context>::new());

        let res = juniper::execute(
            &format!(
                r#"mutation {{
                    createBooking(
                        propertyId: "{id}",
                        startDate: "2022-01-01",
                        endDate: "01-02-2022",
                    ) {{ id }}
                }}"#,
            ),
            None,
            &schema,
            &Variables::new(),
            &ctx,
        )
        .await;

        assert!(
            res.map_or(true, |(_, errs)| !errs.is_empty()),
            "malformed `Date` must be rejected",
        );
    }
}
