//! In-memory repositories backing service and router tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

use super::like_repo::duplicate_like;
use super::{
    FollowerRepository, LikeRepository, Repositories, RetweetRepository, TweetRepository,
    UserRepository,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    Follower, Like, ListParams, NewFollower, NewLike, NewRetweet, NewTweet, NewUser, Page,
    Retweet, Tweet, UpdateTweet, UpdateUser, User, UserCredentials, ensure_not_self_follow,
};

#[derive(Default)]
struct Tables {
    users: Vec<(User, bool)>,
    tweets: Vec<Tweet>,
    likes: Vec<Like>,
    followers: Vec<Follower>,
    retweets: Vec<Retweet>,
}

#[derive(Clone, Default)]
pub struct MemoryStore(Arc<Mutex<Tables>>);

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.0.lock().unwrap()
    }
}

impl Repositories {
    pub fn in_memory() -> Self {
        let store = MemoryStore::default();
        Self {
            users: Arc::new(store.clone()),
            tweets: Arc::new(store.clone()),
            likes: Arc::new(store.clone()),
            followers: Arc::new(store.clone()),
            retweets: Arc::new(store),
        }
    }
}

fn now() -> jiff_diesel::Timestamp {
    jiff::Timestamp::now().to_diesel()
}

/// Newest rows first, the way the SQL repositories order them.
fn paginate<'a, T: Clone + 'a>(
    rows: impl DoubleEndedIterator<Item = &'a T>,
    params: &ListParams,
) -> Page<T> {
    let matching: Vec<T> = rows.rev().cloned().collect();
    let count = matching.len() as i64;
    let items = matching
        .into_iter()
        .skip(params.offset() as usize)
        .take(params.limit() as usize)
        .collect();
    Page::new(items, count)
}

impl Tables {
    /// Same rule as the SQL guard: soft-deleted authors are rejected, unknown
    /// ids pass since there are no foreign keys here.
    fn ensure_live_users(&self, ids: &[Uuid]) -> AppResult<()> {
        match self
            .users
            .iter()
            .find(|(u, deleted)| *deleted && ids.contains(&u.id))
        {
            Some((u, _)) => Err(AppError::not_found("user", "id", u.id)),
            None => Ok(()),
        }
    }
}

fn contains_term(haystack: &str, params: &ListParams) -> bool {
    match params.search.as_deref() {
        Some(term) => haystack.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> AppResult<Uuid> {
        let mut tables = self.tables();
        if tables.users.iter().any(|(u, _)| u.username == new_user.username) {
            return Err(AppError::duplicate("users", "username", &new_user.username));
        }
        let id = Uuid::new_v4();
        let ts = now();
        tables.users.push((
            User {
                id,
                username: new_user.username,
                password_hash: new_user.password_hash,
                name: new_user.name,
                bio: new_user.bio,
                profile_picture: new_user.profile_picture,
                created_at: ts,
                updated_at: ts,
            },
            false,
        ));
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.tables()
            .users
            .iter()
            .find(|(u, deleted)| u.id == id && !deleted)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<User>> {
        let tables = self.tables();
        let rows = tables
            .users
            .iter()
            .filter(|(u, deleted)| {
                !deleted && (contains_term(&u.username, params) || contains_term(&u.name, params))
            })
            .map(|(u, _)| u)
            .collect::<Vec<_>>();
        Ok(paginate(rows.into_iter(), params))
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<Uuid> {
        let mut tables = self.tables();
        let (user, _) = tables
            .users
            .iter_mut()
            .find(|(u, deleted)| u.id == id && !deleted)
            .ok_or_else(|| AppError::not_found("user", "id", id))?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(bio) = changes.bio {
            user.bio = bio;
        }
        if let Some(picture) = changes.profile_picture {
            user.profile_picture = picture;
        }
        user.updated_at = now();
        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables();
        let (_, deleted) = tables
            .users
            .iter_mut()
            .find(|(u, deleted)| u.id == id && !*deleted)
            .ok_or_else(|| AppError::not_found("user", "id", id))?;
        *deleted = true;
        Ok(())
    }

    async fn get_password_hash(&self, id: Uuid) -> AppResult<String> {
        UserRepository::get_by_id(self, id)
            .await
            .map(|u| u.password_hash)
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let mut tables = self.tables();
        let (user, _) = tables
            .users
            .iter_mut()
            .find(|(u, deleted)| u.id == id && !deleted)
            .ok_or_else(|| AppError::not_found("user", "id", id))?;
        user.password_hash = password_hash;
        user.updated_at = now();
        Ok(())
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> AppResult<Option<UserCredentials>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|(u, deleted)| u.username == username && !deleted)
            .map(|(u, _)| UserCredentials {
                id: u.id,
                username: u.username.clone(),
                password_hash: u.password_hash.clone(),
            }))
    }
}

#[async_trait]
impl TweetRepository for MemoryStore {
    async fn create(&self, new_tweet: NewTweet) -> AppResult<Uuid> {
        let mut tables = self.tables();
        tables.ensure_live_users(&[new_tweet.user_id])?;
        let id = Uuid::new_v4();
        let ts = now();
        tables.tweets.push(Tweet {
            id,
            user_id: new_tweet.user_id,
            content: new_tweet.content,
            image_url: new_tweet.image_url,
            video_url: new_tweet.video_url,
            created_at: ts,
            updated_at: ts,
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Tweet> {
        self.tables()
            .tweets
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("tweet", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Tweet>> {
        let tables = self.tables();
        let rows = tables
            .tweets
            .iter()
            .filter(|t| contains_term(&t.content, params))
            .filter(|t| params.user_id.is_none_or(|uid| t.user_id == uid))
            .collect::<Vec<_>>();
        Ok(paginate(rows.into_iter(), params))
    }

    async fn update(&self, id: Uuid, changes: UpdateTweet) -> AppResult<Uuid> {
        let mut tables = self.tables();
        let tweet = tables
            .tweets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found("tweet", "id", id))?;
        if let Some(content) = changes.content {
            tweet.content = content;
        }
        if changes.image_url.is_some() {
            tweet.image_url = changes.image_url;
        }
        if changes.video_url.is_some() {
            tweet.video_url = changes.video_url;
        }
        tweet.updated_at = now();
        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables();
        let before = tables.tweets.len();
        tables.tweets.retain(|t| t.id != id);
        if tables.tweets.len() == before {
            return Err(AppError::not_found("tweet", "id", id));
        }
        tables.likes.retain(|l| l.tweet_id != id);
        tables.retweets.retain(|r| r.original_tweet_id != id);
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn create(&self, new_like: NewLike) -> AppResult<Uuid> {
        let mut tables = self.tables();
        tables.ensure_live_users(&[new_like.user_id])?;
        if tables
            .likes
            .iter()
            .any(|l| l.tweet_id == new_like.tweet_id && l.user_id == new_like.user_id)
        {
            return Err(duplicate_like(&new_like));
        }
        let id = Uuid::new_v4();
        tables.likes.push(Like {
            like_id: id,
            tweet_id: new_like.tweet_id,
            user_id: new_like.user_id,
            created_at: now(),
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Like> {
        self.tables()
            .likes
            .iter()
            .find(|l| l.like_id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("like", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Like>> {
        let tables = self.tables();
        let rows = tables
            .likes
            .iter()
            .filter(|l| params.tweet_id.is_none_or(|tid| l.tweet_id == tid))
            .filter(|l| params.user_id.is_none_or(|uid| l.user_id == uid))
            .collect::<Vec<_>>();
        Ok(paginate(rows.into_iter(), params))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables();
        let before = tables.likes.len();
        tables.likes.retain(|l| l.like_id != id);
        if tables.likes.len() == before {
            return Err(AppError::not_found("like", "id", id));
        }
        Ok(())
    }
}

#[async_trait]
impl FollowerRepository for MemoryStore {
    async fn create(&self, new_follower: NewFollower) -> AppResult<Uuid> {
        ensure_not_self_follow(&new_follower)?;
        let mut tables = self.tables();
        tables.ensure_live_users(&[new_follower.user_id, new_follower.follower_user_id])?;
        if tables.followers.iter().any(|f| {
            f.user_id == new_follower.user_id && f.follower_user_id == new_follower.follower_user_id
        }) {
            return Err(AppError::duplicate(
                "followers",
                "user_id, follower_user_id",
                format!("{}, {}", new_follower.user_id, new_follower.follower_user_id),
            ));
        }
        let id = Uuid::new_v4();
        tables.followers.push(Follower {
            follower_id: id,
            user_id: new_follower.user_id,
            follower_user_id: new_follower.follower_user_id,
            created_at: now(),
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Follower> {
        self.tables()
            .followers
            .iter()
            .find(|f| f.follower_id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("follower", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Follower>> {
        let tables = self.tables();
        let rows = tables
            .followers
            .iter()
            .filter(|f| params.user_id.is_none_or(|uid| f.user_id == uid))
            .collect::<Vec<_>>();
        Ok(paginate(rows.into_iter(), params))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables();
        let before = tables.followers.len();
        tables.followers.retain(|f| f.follower_id != id);
        if tables.followers.len() == before {
            return Err(AppError::not_found("follower", "id", id));
        }
        Ok(())
    }
}

#[async_trait]
impl RetweetRepository for MemoryStore {
    async fn create(&self, new_retweet: NewRetweet) -> AppResult<Uuid> {
        let mut tables = self.tables();
        tables.ensure_live_users(&[new_retweet.user_id])?;
        let id = Uuid::new_v4();
        tables.retweets.push(Retweet {
            retweet_id: id,
            original_tweet_id: new_retweet.original_tweet_id,
            user_id: new_retweet.user_id,
            created_at: now(),
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Retweet> {
        self.tables()
            .retweets
            .iter()
            .find(|r| r.retweet_id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("retweet", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Retweet>> {
        let tables = self.tables();
        let rows = tables
            .retweets
            .iter()
            .filter(|r| params.user_id.is_none_or(|uid| r.user_id == uid))
            .filter(|r| params.tweet_id.is_none_or(|tid| r.original_tweet_id == tid))
            .collect::<Vec<_>>();
        Ok(paginate(rows.into_iter(), params))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables();
        let before = tables.retweets.len();
        tables.retweets.retain(|r| r.retweet_id != id);
        if tables.retweets.len() == before {
            return Err(AppError::not_found("retweet", "id", id));
        }
        Ok(())
    }
}
