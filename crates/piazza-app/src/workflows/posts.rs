//! Feed workflows

use crate::bridge::{NewPost, RestBridge, RestError};
use crate::state::ToastLevel;
use crate::store::AppStore;
use piazza_core::{PostId, UserId};

const FETCH_FEED_FAILED: &str = "Failed to fetch feed";
const CREATE_POST_FAILED: &str = "Failed to create post";
const LIKE_POST_FAILED: &str = "Failed to like post";
const DELETE_POST_FAILED: &str = "Failed to delete post";

/// Fetch one feed page. Page 1 replaces the feed, later pages append; see
/// [`crate::state::PostsState::apply_feed_page`] for the pagination
/// contract.
pub async fn fetch_feed(store: &AppStore, rest: &dyn RestBridge, page: u32) -> Result<(), RestError> {
    store.posts.mutate(|posts| posts.begin_loading());
    match rest.feed(page).await {
        Ok(posts) => {
            store.posts.mutate(|state| state.apply_feed_page(page, posts));
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(FETCH_FEED_FAILED).to_owned();
            store.posts.mutate(|state| state.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Publish a post; the server's copy is prepended on success.
pub async fn create_post(
    store: &AppStore,
    rest: &dyn RestBridge,
    post: NewPost,
) -> Result<(), RestError> {
    store.posts.mutate(|posts| posts.begin_loading());
    match rest.create_post(post).await {
        Ok(created) => {
            store.posts.mutate(|state| {
                state.is_loading = false;
                state.add_post(created);
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(CREATE_POST_FAILED).to_owned();
            store.posts.mutate(|state| state.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Like/unlike a post: an optimistic local toggle followed by the
/// authoritative request.
///
/// The one workflow without a loading phase: the toggle commits before
/// the request is issued. The server's answer overwrites the like set and
/// counter wholesale, reconciling any divergence from the prediction. A
/// failed confirmation does not roll the optimistic toggle back; the next
/// successful fetch of the post reconciles instead.
pub async fn toggle_like(
    store: &AppStore,
    rest: &dyn RestBridge,
    post_id: &PostId,
    user_id: &UserId,
) -> Result<(), RestError> {
    store
        .posts
        .mutate(|posts| posts.toggle_like(post_id, user_id));
    match rest.like_post(post_id).await {
        Ok(outcome) => {
            store.posts.mutate(|posts| {
                posts.apply_like_outcome(post_id, outcome.likes, outcome.likes_count);
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(LIKE_POST_FAILED).to_owned();
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}

/// Delete a post; removed from the feed on success.
pub async fn delete_post(
    store: &AppStore,
    rest: &dyn RestBridge,
    post_id: &PostId,
) -> Result<(), RestError> {
    store.posts.mutate(|posts| posts.begin_loading());
    match rest.delete_post(post_id).await {
        Ok(()) => {
            store.posts.mutate(|posts| {
                posts.is_loading = false;
                posts.remove_post(post_id);
            });
            Ok(())
        }
        Err(error) => {
            let message = error.message_or(DELETE_POST_FAILED).to_owned();
            store.posts.mutate(|posts| posts.fail(message.clone()));
            store.toast(ToastLevel::Error, message);
            Err(error)
        }
    }
}
