//! Closed enumerations for the storefront's presentational chrome.
//!
//! Pure mappings from variant to style tokens; no I/O and no dependency on
//! the request handlers. Server-side templates pick a variant and splice the
//! token string into markup.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    pub fn class_tokens(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-indigo-600 text-white hover:bg-indigo-700",
            ButtonVariant::Secondary => "bg-gray-100 text-gray-900 hover:bg-gray-200",
            ButtonVariant::Danger => "bg-red-600 text-white hover:bg-red-700",
            ButtonVariant::Ghost => "bg-transparent text-gray-700 hover:bg-gray-100",
        }
    }
}

/// Order-state badge, keyed by the status strings the data layer stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStatus {
    Pending,
    Processing,
    Shipping,
    Completed,
    Cancelled,
}

impl BadgeStatus {
    pub fn class_tokens(&self) -> &'static str {
        match self {
            BadgeStatus::Pending => "bg-yellow-100 text-yellow-800",
            BadgeStatus::Processing => "bg-blue-100 text-blue-800",
            BadgeStatus::Shipping => "bg-purple-100 text-purple-800",
            BadgeStatus::Completed => "bg-green-100 text-green-800",
            BadgeStatus::Cancelled => "bg-gray-100 text-gray-600",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BadgeStatus::Pending => "Pending",
            BadgeStatus::Processing => "Processing",
            BadgeStatus::Shipping => "Shipping",
            BadgeStatus::Completed => "Completed",
            BadgeStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for BadgeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(BadgeStatus::Pending),
            "processing" => Ok(BadgeStatus::Processing),
            "shipping" => Ok(BadgeStatus::Shipping),
            "completed" => Ok(BadgeStatus::Completed),
            "cancelled" => Ok(BadgeStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    pub fn class_tokens(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "h-4 w-4",
            SpinnerSize::Medium => "h-8 w-8",
            SpinnerSize::Large => "h-12 w-12",
        }
    }
}
