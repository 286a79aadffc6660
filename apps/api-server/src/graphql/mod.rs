//! GraphQL adapter - the second protocol surface over the same engine.
//!
//! The bearer token is resolved once per request by the HTTP layer and
//! placed in the GraphQL context; resolvers enforce authentication per
//! field. Error causes and validation thresholds are identical to the REST
//! surface because both call the same services.

mod schema;

use actix_web::web;
use async_graphql::{Context, EmptySubscription, Error, ErrorExtensions, Result, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use feedr_core::DomainError;
use feedr_core::domain::Identity;

use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

pub use schema::{MutationRoot, QueryRoot};

pub type FeedrSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the application state attached.
pub fn build_schema(state: AppState) -> FeedrSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

/// POST /graphql
pub async fn graphql_handler(
    schema: web::Data<FeedrSchema>,
    auth: MaybeAuthUser,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data(auth.0);
    schema.execute(request).await.into()
}

/// Map a domain failure onto a GraphQL error with a `code` extension
/// mirroring the REST status code.
pub(crate) fn to_gql(err: DomainError) -> Error {
    let code = match &err {
        DomainError::Validation(_) => 422,
        DomainError::DuplicateEmail(_) => 409,
        DomainError::NotFound { .. } => 404,
        DomainError::NotAuthorized => 403,
        DomainError::Unauthenticated | DomainError::BadCredentials => 401,
        DomainError::Upstream(_) => 500,
    };

    let message = match &err {
        DomainError::Upstream(detail) => {
            tracing::error!("Upstream failure: {}", detail);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    Error::new(message).extend_with(|_, e| e.set("code", code))
}

pub(crate) fn current_identity<'ctx>(ctx: &Context<'ctx>) -> Option<&'ctx Identity> {
    ctx.data_opt::<Option<Identity>>().and_then(|opt| opt.as_ref())
}

/// Per-field authentication check.
pub(crate) fn require_auth<'ctx>(ctx: &Context<'ctx>) -> Result<&'ctx Identity> {
    current_identity(ctx).ok_or_else(|| to_gql(DomainError::Unauthenticated))
}
