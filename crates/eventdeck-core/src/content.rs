//! Site content shown in carousels: team members, rosters and photos.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A team member card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub role: String,
    /// Department, e.g. `"Tech"` or `"Ops"`.
    #[serde(default)]
    pub dept: String,
    /// Avatar initials; derived from the name when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar: String,
}

impl Member {
    pub fn new(name: impl Into<String>, role: impl Into<String>, dept: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            dept: dept.into(),
            avatar: String::new(),
        }
    }

    /// Builder method to set explicit avatar initials.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// The avatar initials, or up to two initials taken from the name.
    ///
    /// `"G. Akshitha"` gives `"GA"`.
    pub fn initials(&self) -> String {
        if !self.avatar.trim().is_empty() {
            return self.avatar.trim().to_string();
        }
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().find(|c| c.is_alphabetic()))
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// A gallery picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u32,
    /// Asset path of the image.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Photo {
    pub fn new(id: u32, image: impl Into<String>) -> Self {
        Self {
            id,
            image: image.into(),
            caption: None,
        }
    }
}

/// Team members grouped by the year they served, oldest year first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    years: BTreeMap<String, Vec<Member>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a year.
    pub fn with_year(mut self, year: impl Into<String>, members: Vec<Member>) -> Self {
        self.insert(year, members);
        self
    }

    /// Sets the members of `year`, replacing any previous list.
    pub fn insert(&mut self, year: impl Into<String>, members: Vec<Member>) {
        self.years.insert(year.into(), members);
    }

    /// Years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.keys().map(String::as_str)
    }

    /// The most recent year, shown by default.
    pub fn latest_year(&self) -> Option<&str> {
        self.years.keys().next_back().map(String::as_str)
    }

    /// Members of `year`, if that year exists.
    pub fn members(&self, year: &str) -> Option<&[Member]> {
        self.years.get(year).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Years listed with no members.
    pub fn empty_years(&self) -> Vec<&str> {
        self.years
            .iter()
            .filter(|(_, members)| members.is_empty())
            .map(|(year, _)| year.as_str())
            .collect()
    }
}
