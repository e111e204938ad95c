//! Post feed state
//!
//! Owns the paginated feed and per-post mutation. Feed order is exactly the
//! order produced by the fetch sequence; the store never resorts.

use piazza_core::{Post, PostId, UserId};
use serde::{Deserialize, Serialize};

/// State of the post feed surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsState {
    /// Feed posts in fetch order.
    pub posts: Vec<Post>,
    /// Post opened in a detail surface, when any.
    pub current_post: Option<Post>,
    /// A feed fetch is in flight.
    pub is_loading: bool,
    /// Last fetch failure, as user-facing text.
    pub error: Option<String>,
    /// Whether another page may exist. Derived from "the last fetched page
    /// was non-empty", so the final page is detected one request late.
    pub has_more: bool,
    /// The page most recently applied.
    pub page: u32,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            current_post: None,
            is_loading: false,
            error: None,
            has_more: true,
            page: 1,
        }
    }
}

impl PostsState {
    /// Begin a fetch: loading on, previous error cleared.
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Terminal failure: loading off, error text recorded.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(message.into());
    }

    fn post_mut(&mut self, id: &PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == *id)
    }

    /// Prepend a post (newest first).
    pub fn add_post(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    /// Replace a post by id; no-op when absent.
    pub fn update_post(&mut self, post: Post) {
        if let Some(existing) = self.post_mut(&post.id) {
            *existing = post;
        }
    }

    /// Remove a post by id; no-op when absent.
    pub fn remove_post(&mut self, id: &PostId) {
        self.posts.retain(|p| p.id != *id);
    }

    /// Optimistic like toggle for `user_id` on `post_id`.
    ///
    /// Present → removed and counter decremented; absent → inserted and
    /// counter incremented. Two consecutive calls restore the original like
    /// set and count. This is a local prediction only; the authoritative
    /// response applied via [`PostsState::apply_like_outcome`] reconciles
    /// any divergence.
    pub fn toggle_like(&mut self, post_id: &PostId, user_id: &UserId) {
        if let Some(post) = self.post_mut(post_id) {
            if let Some(index) = post.likes.iter().position(|u| u == user_id) {
                post.likes.remove(index);
                post.likes_count = post.likes_count.saturating_sub(1);
            } else {
                post.likes.push(user_id.clone());
                post.likes_count = post.likes_count.saturating_add(1);
            }
        }
    }

    /// Overwrite a post's like set and counter with the server's answer.
    pub fn apply_like_outcome(&mut self, post_id: &PostId, likes: Vec<UserId>, likes_count: u32) {
        if let Some(post) = self.post_mut(post_id) {
            post.likes = likes;
            post.likes_count = likes_count;
        }
    }

    /// Bump the comment counter; no-op when the post is unknown.
    pub fn increment_comment_count(&mut self, post_id: &PostId) {
        if let Some(post) = self.post_mut(post_id) {
            post.comments_count = post.comments_count.saturating_add(1);
        }
    }

    /// Commit one fetched feed page.
    ///
    /// Page 1 replaces the list (fresh load / pull-to-refresh); any later
    /// page appends (infinite scroll). `has_more` flips off only when the
    /// fetched page comes back empty.
    pub fn apply_feed_page(&mut self, page: u32, posts: Vec<Post>) {
        self.is_loading = false;
        self.has_more = !posts.is_empty();
        self.page = page;
        if page == 1 {
            self.posts = posts;
        } else {
            self.posts.extend(posts);
        }
    }

    /// Reset to a pristine feed (used on logout).
    pub fn clear(&mut self) {
        self.posts.clear();
        self.current_post = None;
        self.page = 1;
        self.has_more = true;
    }
}
