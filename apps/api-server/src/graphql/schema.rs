//! GraphQL schema: object types, inputs, and the query/mutation roots.

use async_graphql::{Context, ID, InputObject, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use feedr_core::DomainError;
use feedr_core::domain::User;
use feedr_core::services::PostView;

use super::{require_auth, to_gql};
use crate::state::AppState;

#[derive(SimpleObject)]
#[graphql(name = "User")]
pub struct UserType {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub status: String,
    pub posts: Vec<PostType>,
}

#[derive(SimpleObject)]
#[graphql(name = "Post")]
pub struct PostType {
    pub id: ID,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator: CreatorType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(SimpleObject)]
#[graphql(name = "Creator")]
pub struct CreatorType {
    pub id: ID,
    pub name: String,
}

#[derive(SimpleObject)]
#[graphql(name = "PostsData")]
pub struct PostsData {
    pub posts: Vec<PostType>,
    pub total_items: u64,
}

#[derive(SimpleObject)]
#[graphql(name = "AuthData")]
pub struct AuthData {
    pub token: String,
    pub user_id: ID,
}

#[derive(InputObject)]
#[graphql(name = "UserInputData")]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(InputObject)]
#[graphql(name = "PostInputData")]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

#[derive(InputObject)]
#[graphql(name = "PostUpdateData")]
pub struct UpdatePostInput {
    pub title: String,
    pub content: String,
    /// Omit to keep the current image.
    pub image_url: Option<String>,
}

fn view_to_type(view: PostView) -> PostType {
    PostType {
        id: view.post.id.into(),
        title: view.post.title,
        content: view.post.content,
        image_url: view.post.image_url,
        creator: CreatorType {
            id: view.owner.id.into(),
            name: view.owner.name,
        },
        created_at: view.post.created_at,
        updated_at: view.post.updated_at,
    }
}

fn user_to_type(user: User, posts: Vec<PostType>) -> UserType {
    UserType {
        id: user.id.into(),
        email: user.email,
        name: user.name,
        status: user.status,
        posts,
    }
}

fn parse_id(id: &ID) -> Result<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| to_gql(DomainError::validation("invalid id")))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Exchange credentials for a bearer token.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthData> {
        let state = ctx.data_unchecked::<AppState>();
        let session = state
            .credentials
            .authenticate(&email, &password)
            .await
            .map_err(to_gql)?;

        Ok(AuthData {
            token: session.token,
            user_id: session.user.id.into(),
        })
    }

    /// One feed page, newest first.
    async fn posts(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<PostsData> {
        require_auth(ctx)?;
        let state = ctx.data_unchecked::<AppState>();

        let page = page.unwrap_or(1).max(1) as u64;
        let feed_page = state.feed.page(page).await.map_err(to_gql)?;

        Ok(PostsData {
            posts: feed_page.items.into_iter().map(view_to_type).collect(),
            total_items: feed_page.total_items,
        })
    }

    /// A single post by id.
    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<PostType> {
        require_auth(ctx)?;
        let state = ctx.data_unchecked::<AppState>();

        let view = state.feed.single(parse_id(&id)?).await.map_err(to_gql)?;
        Ok(view_to_type(view))
    }

    /// The caller's own account.
    async fn user(&self, ctx: &Context<'_>) -> Result<UserType> {
        let identity = require_auth(ctx)?;
        let state = ctx.data_unchecked::<AppState>();

        let user = state
            .accounts
            .profile(identity.user_id)
            .await
            .map_err(to_gql)?;
        let posts = state
            .feed
            .for_owner(identity.user_id)
            .await
            .map_err(to_gql)?
            .into_iter()
            .map(view_to_type)
            .collect();

        Ok(user_to_type(user, posts))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create an account.
    async fn create_user(&self, ctx: &Context<'_>, input: CreateUserInput) -> Result<UserType> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state
            .credentials
            .register(&input.name, &input.email, &input.password)
            .await
            .map_err(to_gql)?;

        Ok(user_to_type(user, Vec::new()))
    }

    /// Create a post. The image must have been uploaded first via the
    /// standalone upload endpoint; its returned path goes in `imageUrl`.
    async fn create_post(&self, ctx: &Context<'_>, input: CreatePostInput) -> Result<PostType> {
        let identity = require_auth(ctx)?.clone();
        let state = ctx.data_unchecked::<AppState>();

        let post = state
            .posts
            .create(&identity, &input.title, &input.content, &input.image_url)
            .await
            .map_err(to_gql)?;
        let view = state.feed.single(post.id).await.map_err(to_gql)?;

        Ok(view_to_type(view))
    }

    /// Update a post. Only its owner may do this.
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdatePostInput,
    ) -> Result<PostType> {
        let identity = require_auth(ctx)?.clone();
        let state = ctx.data_unchecked::<AppState>();

        let post = state
            .posts
            .update(
                &identity,
                parse_id(&id)?,
                &input.title,
                &input.content,
                input.image_url.as_deref(),
            )
            .await
            .map_err(to_gql)?;
        let view = state.feed.single(post.id).await.map_err(to_gql)?;

        Ok(view_to_type(view))
    }

    /// Delete a post. Only its owner may do this.
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let identity = require_auth(ctx)?.clone();
        let state = ctx.data_unchecked::<AppState>();

        state
            .posts
            .delete(&identity, parse_id(&id)?)
            .await
            .map_err(to_gql)?;

        Ok(true)
    }

    /// Update the caller's own status.
    async fn update_status(&self, ctx: &Context<'_>, status: String) -> Result<UserType> {
        let identity = require_auth(ctx)?.clone();
        let state = ctx.data_unchecked::<AppState>();

        let user = state
            .accounts
            .set_status(identity.user_id, &status)
            .await
            .map_err(to_gql)?;
        let posts = state
            .feed
            .for_owner(identity.user_id)
            .await
            .map_err(to_gql)?
            .into_iter()
            .map(view_to_type)
            .collect();

        Ok(user_to_type(user, posts))
    }
}
