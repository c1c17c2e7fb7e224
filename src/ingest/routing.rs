//! Recipient routing
//!
//! Decides whether a video goes straight to category selection (the account
//! has exactly one implicit recipient) or to student selection.

use crate::screens::navigation::Screen;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
    Other,
}

/// Signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub role: Role,
    /// Ids of the students this account manages, in order
    pub dependent_ids: Vec<String>,
}

/// Supplies the signed-in account
pub trait AccountProvider: Send + Sync {
    fn current_account(&self) -> Option<Account>;
}

/// Where routing sends the video next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    CategorySelect,
    StudentSelect,
}

impl Destination {
    pub fn screen(&self) -> Screen {
        match self {
            Destination::CategorySelect => Screen::CategorySelect,
            Destination::StudentSelect => Screen::StudentSelect,
        }
    }
}

/// Next screen and its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingTarget {
    pub destination: Destination,
    pub video_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_ids: Option<Vec<String>>,
    pub single_recipient: bool,
}

/// Recipients implied by the account: itself for a student, its dependents otherwise
pub fn recipients(account: &Account) -> Vec<String> {
    match account.role {
        Role::Student => vec![account.id.clone()],
        Role::Teacher | Role::Other => account.dependent_ids.clone(),
    }
}

/// Whether the account has exactly one implicit recipient
pub fn is_single_recipient(account: &Account) -> bool {
    account.role != Role::Teacher && recipients(account).len() == 1
}

/// Pick the next screen for a video
pub fn decide(account: &Account, video_uri: &str) -> RoutingTarget {
    if is_single_recipient(account) {
        RoutingTarget {
            destination: Destination::CategorySelect,
            video_uri: video_uri.to_string(),
            recipient_ids: Some(recipients(account)),
            single_recipient: true,
        }
    } else {
        RoutingTarget {
            destination: Destination::StudentSelect,
            video_uri: video_uri.to_string(),
            recipient_ids: None,
            single_recipient: false,
        }
    }
}

/// Session state shared with downstream screens
#[derive(Debug, Default)]
pub struct SessionFlags {
    single_recipient: AtomicBool,
}

impl SessionFlags {
    pub fn publish_single_recipient(&self, single: bool) {
        self.single_recipient.store(single, Ordering::Relaxed);
    }

    pub fn single_recipient(&self) -> bool {
        self.single_recipient.load(Ordering::Relaxed)
    }
}
