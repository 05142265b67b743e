#![allow(dead_code)]

//! Test infrastructure for bm-server: in-memory backend fakes and state

use bm_server::{AppState, Backends, Pages};

use bm_config::Config;
use bm_core::{AuthSession, Bookmark, LiveEvent, NewBookmark, SubscriptionStatus, User};
use bm_live::ShutdownCoordinator;
use bm_supabase::{
    AuthService, BackendError, BookmarkStore, LiveChannel, LiveSubscription, Result,
    SignUpOutcome,
};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{Duration, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

pub const PASSWORD: &str = "correct horse";

/// Auth service with one known account per registered email.
#[derive(Default)]
pub struct FakeAuth {
    users: Mutex<HashMap<String, User>>,
    /// Access tokens `get_user` accepts
    tokens: Mutex<HashMap<String, User>>,
    pub confirm_sign_ups: AtomicBool,
    pub refresh_calls: AtomicUsize,
    pub sign_outs: AtomicUsize,
}

impl FakeAuth {
    pub fn with_user(email: &str) -> (Arc<Self>, User) {
        let auth = Arc::new(Self::default());
        let user = auth.register(email);
        (auth, user)
    }

    pub fn register(&self, email: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: User::name_from_email(email),
            avatar: String::new(),
        };
        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), user.clone());
        user
    }

    /// Make every access token issued so far invalid.
    pub fn revoke_all(&self) {
        self.tokens.lock().unwrap().clear();
    }

    /// Sign `user` in without a password.
    pub fn issue_session(&self, user: &User) -> AuthSession {
        self.session_for(user.clone())
    }

    fn session_for(&self, user: User) -> AuthSession {
        let access_token = format!("access-{}", Uuid::new_v4());
        self.tokens
            .lock()
            .unwrap()
            .insert(access_token.clone(), user.clone());
        AuthSession {
            access_token,
            refresh_token: format!("refresh-{}", user.id),
            expires_at: Utc::now() + Duration::hours(1),
            user,
        }
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let user = self.users.lock().unwrap().get(email).cloned();
        match user {
            Some(user) if password == PASSWORD => Ok(self.session_for(user)),
            _ => Err(BackendError::api(400, "Invalid login credentials")),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        _redirect_to: &str,
    ) -> Result<SignUpOutcome> {
        if self.users.lock().unwrap().contains_key(email) {
            return Err(BackendError::api(422, "User already registered"));
        }
        let user = self.register(email);
        if self.confirm_sign_ups.load(Ordering::SeqCst) {
            Ok(SignUpOutcome::ConfirmationRequired)
        } else {
            Ok(SignUpOutcome::SessionCreated(self.session_for(user)))
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<()> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<User> {
        self.tokens
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(|| BackendError::api(401, "invalid JWT"))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        let user = self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| refresh_token == format!("refresh-{}", u.id))
            .cloned();
        match user {
            Some(user) => Ok(self.session_for(user)),
            None => Err(BackendError::api(400, "Invalid Refresh Token")),
        }
    }

    async fn verify_email(&self, token_hash: &str, _kind: &str) -> Result<AuthSession> {
        let user = self.users.lock().unwrap().values().next().cloned();
        match user {
            Some(user) if token_hash == "valid-hash" => Ok(self.session_for(user)),
            _ => Err(BackendError::api(403, "Email link is invalid or has expired")),
        }
    }
}

/// Bookmark rows in memory, newest first.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<Bookmark>>,
    pub inserts: AtomicUsize,
    pub lists: AtomicUsize,
    pub fail_insert: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FakeStore {
    pub fn seed(&self, owner: Uuid, title: &str, url: &str) -> Bookmark {
        let row = Bookmark {
            id: Uuid::new_v4(),
            title: title.to_string(),
            url: url.to_string(),
            user_id: owner,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(0, row.clone());
        row
    }

    pub fn rows(&self) -> Vec<Bookmark> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookmarkStore for FakeStore {
    async fn list(&self, _access_token: &str, owner: Uuid) -> Result<Vec<Bookmark>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == owner)
            .cloned()
            .collect())
    }

    async fn insert(&self, _access_token: &str, bookmark: &NewBookmark) -> Result<Bookmark> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(BackendError::api(403, "new row violates row-level security policy"));
        }
        let row = Bookmark {
            id: Uuid::new_v4(),
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            user_id: bookmark.user_id,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(0, row.clone());
        Ok(row)
    }

    async fn delete(&self, _access_token: &str, id: Uuid, owner: Uuid) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(BackendError::api(500, "delete failed"));
        }
        self.rows
            .lock()
            .unwrap()
            .retain(|b| !(b.id == id && b.user_id == owner));
        Ok(())
    }
}

/// Live channel whose events are pushed by the test.
#[derive(Default)]
pub struct FakeLive {
    senders: Mutex<Vec<mpsc::Sender<LiveEvent>>>,
    pub subscriptions: AtomicUsize,
    pub fail_subscribe: AtomicBool,
}

impl FakeLive {
    /// Send to the most recent subscription.
    pub async fn push(&self, event: LiveEvent) {
        let sender = self.senders.lock().unwrap().last().cloned();
        if let Some(sender) = sender {
            sender.send(event).await.unwrap();
        }
    }

    /// End every subscription, as when the backend drops the socket.
    pub fn close_all(&self) {
        self.senders.lock().unwrap().clear();
    }
}

#[async_trait]
impl LiveChannel for FakeLive {
    async fn subscribe(&self, _access_token: &str, _owner: Uuid) -> Result<LiveSubscription> {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(BackendError::api(503, "realtime unavailable"));
        }
        let (tx, rx) = mpsc::channel(16);
        tx.send(LiveEvent::Status(SubscriptionStatus::Connecting))
            .await
            .unwrap();
        self.senders.lock().unwrap().push(tx);
        Ok(LiveSubscription::from_receiver(rx))
    }
}

pub struct TestApp {
    pub state: AppState,
    pub auth: Arc<FakeAuth>,
    pub store: Arc<FakeStore>,
    pub live: Arc<FakeLive>,
}

/// Create AppState for testing on top of the fakes
pub fn create_test_app(auth: Arc<FakeAuth>) -> TestApp {
    create_test_app_with_config(auth, &Config::default())
}

pub fn create_test_app_with_config(auth: Arc<FakeAuth>, config: &Config) -> TestApp {
    let store = Arc::new(FakeStore::default());
    let live = Arc::new(FakeLive::default());
    let backends = Backends {
        auth: auth.clone(),
        store: store.clone(),
        live: live.clone(),
    };
    let pages = Pages::new().expect("Failed to load templates");
    let state = AppState::new(
        backends,
        pages,
        config,
        ShutdownCoordinator::new(),
    );

    TestApp {
        state,
        auth,
        store,
        live,
    }
}

pub fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `name=value` part of the response's Set-Cookie header.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(str::to_string)
}

pub fn location<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)?
        .to_str()
        .ok()
        .map(str::to_string)
}
