use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

/// Services offered in the contact form's select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    InsightEngine,
    ContentCreation,
    DecisionSupport,
    MarketAnalysis,
    CollaborativeAgents,
    StrategicForecasting,
    Other,
}

impl Service {
    pub const ALL: [Service; 7] = [
        Service::InsightEngine,
        Service::ContentCreation,
        Service::DecisionSupport,
        Service::MarketAnalysis,
        Service::CollaborativeAgents,
        Service::StrategicForecasting,
        Service::Other,
    ];

    /// Option value used in the form.
    pub fn value(self) -> &'static str {
        match self {
            Service::InsightEngine => "insight-engine",
            Service::ContentCreation => "content-creation",
            Service::DecisionSupport => "decision-support",
            Service::MarketAnalysis => "market-analysis",
            Service::CollaborativeAgents => "collaborative-agents",
            Service::StrategicForecasting => "strategic-forecasting",
            Service::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Service::InsightEngine => "Insight Engine",
            Service::ContentCreation => "Content Creation",
            Service::DecisionSupport => "Decision Support",
            Service::MarketAnalysis => "Market Analysis",
            Service::CollaborativeAgents => "Collaborative Agents",
            Service::StrategicForecasting => "Strategic Forecasting",
            Service::Other => "Other",
        }
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Service::ALL
            .into_iter()
            .find(|svc| svc.value() == s.trim())
            .ok_or_else(|| Error::UnknownService(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Service,
    Message,
}

impl Field {
    /// DOM id of the matching input.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Service => "service",
            Field::Message => "message",
        }
    }
}

/// Raw values as typed into the contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Select value; empty means "no preference".
    pub service: String,
    pub message: String,
}

/// Validation messages keyed by field.
pub type FieldErrors = BTreeMap<Field, &'static str>;

impl ContactForm {
    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Please enter your name");
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(Field::Email, "Please enter your email");
        } else if !EMAIL_RE.is_match(email) {
            errors.insert(Field::Email, "Please enter a valid email address");
        }
        if self.service().is_err() {
            errors.insert(Field::Service, "Please choose a listed service");
        }
        if self.message.trim().is_empty() {
            errors.insert(Field::Message, "Please tell us about your project");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Selected service, `None` when left blank.
    pub fn service(&self) -> Result<Option<Service>> {
        match self.service.trim() {
            "" => Ok(None),
            value => value.parse().map(Some),
        }
    }
}
