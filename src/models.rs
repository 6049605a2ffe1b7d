use serde::{Deserialize, Serialize};

/// A user from the `/users` endpoint of the mock API.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub address: Address,
    pub company: Company,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Company {
    pub name: String,
}

/// Represents a GitHub user profile from the `/users/{username}` API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    pub avatar_url: String,
    #[serde(rename = "html_url")]
    pub profile_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "blog")]
    pub blog_url: Option<String>,
    #[serde(rename = "twitter_username")]
    pub twitter_handle: Option<String>,
}

impl GithubProfile {
    /// Display name, falling back to the login when the profile has none.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }

    /// GitHub reports an unset blog as an empty string rather than null.
    pub fn blog(&self) -> Option<&str> {
        self.blog_url.as_deref().filter(|b| !b.is_empty())
    }
}

/// A repository entry from `/users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoSummary {
    #[allow(dead_code)]
    pub id: u64,
    pub name: String,
    #[serde(rename = "html_url")]
    pub url: String,
    pub description: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub star_count: u32,
    #[serde(rename = "forks_count")]
    pub fork_count: u32,
    pub language: Option<String>,
}

/// One row of a grouped count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedCount {
    pub label: String,
    pub count: usize,
}

/// One month of the simulated growth panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub label: String,
    pub users: u32,
}

/// Everything the dashboard derives from the user list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub users: Vec<UserRecord>,
    pub total_users: usize,
    pub total_cities: usize,
    pub total_streets: usize,
    pub total_emails: usize,
    pub by_city: Vec<AggregatedCount>,
    pub by_company: Vec<AggregatedCount>,
    pub growth: Vec<GrowthPoint>,
}

/// A successful profile lookup: the profile and its most recently updated repos.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub profile: GithubProfile,
    pub repos: Vec<RepoSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_ignores_extra_fields() {
        let json = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona", "catchPhrase": "x", "bs": "y" }
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.address.city, "Gwenborough");
        assert_eq!(user.company.name, "Romaguera-Crona");
    }

    #[test]
    fn user_record_missing_field_is_an_error() {
        let json = r#"{ "id": 1, "name": "x", "email": "e", "phone": "p",
                        "company": { "name": "c" } }"#;
        assert!(serde_json::from_str::<UserRecord>(json).is_err());
    }

    #[test]
    fn profile_maps_github_field_names() {
        let json = r#"{
            "login": "octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231",
            "html_url": "https://github.com/octocat",
            "name": null,
            "bio": null,
            "followers": 10,
            "following": 0,
            "company": "@github",
            "location": "San Francisco",
            "blog": "",
            "twitter_username": null
        }"#;

        let profile: GithubProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.profile_url, "https://github.com/octocat");
        assert_eq!(profile.display_name(), "octocat");
        assert_eq!(profile.blog(), None);
        assert_eq!(profile.company.as_deref(), Some("@github"));
    }
}
