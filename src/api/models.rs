use std::collections::HashMap;

use serde::Deserialize;

/// Bitbucket Server paged envelope. Only the first page is ever
/// requested, so `values` is all the job consumes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub size: Option<u32>,
    pub is_last_page: Option<bool>,
    pub values: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub slug: String,
    pub name: String,
    /// Owning project, embedded in the repository payload.
    pub project: Project,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub title: String,
    pub created_date: u64,
    pub author: Participant,
    #[serde(default)]
    pub reviewers: Vec<Participant>,
    /// Relation name to hrefs, e.g. `"self"` to the PR's web URL.
    #[serde(default)]
    pub links: HashMap<String, Vec<Link>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    pub user: User,
    #[serde(default)]
    pub status: ParticipantStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Review state as reported by the server. The digest only distinguishes
/// `UNAPPROVED`; anything it does not know is carried opaquely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    #[default]
    Unapproved,
    Approved,
    NeedsWork,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_pull_request_payload() {
        let json = r#"{
            "size": 1,
            "isLastPage": true,
            "values": [{
                "title": "Fix bug",
                "createdDate": 1700000000000,
                "author": {"user": {"name": "carol", "slug": "carol"}, "status": "UNAPPROVED"},
                "reviewers": [
                    {"user": {"name": "alice"}, "status": "UNAPPROVED"},
                    {"user": {"name": "bob"}, "status": "APPROVED"}
                ],
                "links": {"self": [{"href": "https://host/pr/1"}]}
            }]
        }"#;
        let page: PagedResponse<PullRequest> = serde_json::from_str(json).unwrap();
        assert_eq!(page.size, Some(1));
        let pr = &page.values[0];
        assert_eq!(pr.title, "Fix bug");
        assert_eq!(pr.author.user.slug, "carol");
        assert_eq!(pr.reviewers[0].status, ParticipantStatus::Unapproved);
        assert_eq!(pr.reviewers[1].status, ParticipantStatus::Approved);
        assert_eq!(pr.links["self"][0].href, "https://host/pr/1");
    }

    #[test]
    fn unknown_participant_status_is_opaque() {
        let participant: Participant =
            serde_json::from_str(r#"{"user": {"name": "dave"}, "status": "DISMISSED"}"#).unwrap();
        assert_eq!(participant.status, ParticipantStatus::Other);
    }
}
