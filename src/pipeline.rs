use crate::api::client::BitbucketClient;
use crate::api::models::{Link, Participant, Project, Repository};
use crate::config::ReminderConfig;
use crate::error::Error;

/// One open pull request, flattened together with the repository and
/// project that own it. The digest renders these in collection order.
#[derive(Debug, Clone)]
pub struct PullRequestRecord {
    pub project_key: String,
    pub project_name: String,
    pub repository_key: String,
    pub repository_name: String,
    pub title: String,
    pub author: String,
    pub created_date: u64,
    pub reviewers: Vec<Participant>,
    pub self_links: Vec<Link>,
}

impl PullRequestRecord {
    /// First href of the pull request's `self` link, or empty when the
    /// server sent none.
    pub fn link(&self) -> &str {
        self.self_links
            .first()
            .map(|l| l.href.as_str())
            .unwrap_or_default()
    }
}

/// Keep the fetched projects whose key appears in the configured
/// allow-list, in fetch order. An empty allow-list selects everything;
/// allow-listed keys the server did not return are dropped silently.
pub fn select_projects(cfg: &ReminderConfig, projects: Vec<Project>) -> Vec<Project> {
    if cfg.projects.is_empty() {
        return projects;
    }
    projects
        .into_iter()
        .filter(|p| cfg.projects.iter().any(|sel| sel.key == p.key))
        .collect()
}

/// Fetch the repositories of every selected project into one flat
/// sequence: project order, then repository fetch order.
pub async fn collect_repositories(
    client: &BitbucketClient,
    projects: &[Project],
) -> Result<Vec<Repository>, Error> {
    let mut repos = Vec::new();
    for project in projects {
        repos.extend(client.list_repositories(&project.key).await?);
    }
    Ok(repos)
}

/// Fetch the open pull requests of every repository and flatten them
/// into one record per (repository, pull request) pair. Repositories
/// with no open pull requests contribute nothing.
pub async fn collect_pull_requests(
    client: &BitbucketClient,
    repos: &[Repository],
) -> Result<Vec<PullRequestRecord>, Error> {
    let mut records = Vec::new();
    for repo in repos {
        let prs = client
            .list_pull_requests(&repo.project.key, &repo.slug)
            .await?;
        for pr in prs {
            let self_links = pr.links.get("self").cloned().unwrap_or_default();
            records.push(PullRequestRecord {
                project_key: repo.project.key.clone(),
                project_name: repo.project.name.clone(),
                repository_key: repo.slug.clone(),
                repository_name: repo.name.clone(),
                title: pr.title,
                author: pr.author.user.slug,
                created_date: pr.created_date,
                reviewers: pr.reviewers,
                self_links,
            });
        }
    }
    Ok(records)
}

/// Drop reviewers whose user name is on the exclusion list, preserving
/// order. Pure and idempotent.
pub fn filter_reviewers<'a>(
    reviewers: &'a [Participant],
    excluded: &[String],
) -> Vec<&'a Participant> {
    reviewers
        .iter()
        .filter(|r| !excluded.iter().any(|name| *name == r.user.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ParticipantStatus, User};
    use crate::config::ProjectSelection;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn project(id: u64, key: &str, name: &str) -> Project {
        Project {
            id,
            key: key.to_string(),
            name: name.to_string(),
        }
    }

    fn reviewer(name: &str, status: ParticipantStatus) -> Participant {
        Participant {
            user: User {
                name: name.to_string(),
                slug: name.to_string(),
            },
            status,
        }
    }

    fn allow_list(keys: &[&str]) -> ReminderConfig {
        let mut cfg = ReminderConfig::default();
        cfg.projects = keys
            .iter()
            .map(|k| ProjectSelection {
                key: (*k).to_string(),
                repos: Vec::new(),
            })
            .collect();
        cfg
    }

    #[test]
    fn empty_allow_list_selects_all_projects() {
        let fetched = vec![project(1, "A", "Alpha"), project(2, "B", "Beta")];
        let selected = select_projects(&ReminderConfig::default(), fetched.clone());
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].key, fetched[0].key);
        assert_eq!(selected[1].key, fetched[1].key);
    }

    #[test]
    fn selection_preserves_fetch_order_not_allow_list_order() {
        let fetched = vec![
            project(1, "A", "Alpha"),
            project(2, "B", "Beta"),
            project(3, "C", "Gamma"),
        ];
        let cfg = allow_list(&["C", "A"]);
        let selected = select_projects(&cfg, fetched);
        let keys: Vec<_> = selected.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "C"]);
    }

    #[test]
    fn allow_listed_key_missing_from_fetch_is_dropped_silently() {
        let fetched = vec![project(1, "A", "Alpha")];
        let cfg = allow_list(&["A", "ZZZ"]);
        let selected = select_projects(&cfg, fetched);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, "A");
    }

    #[test]
    fn reviewer_filter_preserves_order_and_is_idempotent() {
        let reviewers = vec![
            reviewer("alice", ParticipantStatus::Unapproved),
            reviewer("bob", ParticipantStatus::Approved),
            reviewer("carol", ParticipantStatus::Unapproved),
        ];
        let excluded = vec!["bob".to_string()];

        let once = filter_reviewers(&reviewers, &excluded);
        let names: Vec<_> = once.iter().map(|r| r.user.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol"]);

        let kept: Vec<Participant> = once.into_iter().cloned().collect();
        let twice = filter_reviewers(&kept, &excluded);
        let names_again: Vec<_> = twice.iter().map(|r| r.user.name.as_str()).collect();
        assert_eq!(names_again, names);
    }

    #[test]
    fn empty_reviewer_list_filters_to_empty() {
        assert!(filter_reviewers(&[], &["bob".to_string()]).is_empty());
    }

    #[test]
    fn record_link_is_empty_without_self_href() {
        let record = PullRequestRecord {
            project_key: "TEAM".to_string(),
            project_name: "Team".to_string(),
            repository_key: "svc".to_string(),
            repository_name: "Service".to_string(),
            title: "Fix bug".to_string(),
            author: "carol".to_string(),
            created_date: 0,
            reviewers: Vec::new(),
            self_links: Vec::new(),
        };
        assert_eq!(record.link(), "");
    }

    #[tokio::test]
    async fn collects_one_record_per_pull_request_across_repositories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/1.0/projects/TEAM/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "size": 2,
                "isLastPage": true,
                "values": [
                    {"slug": "svc", "name": "Service",
                     "project": {"id": 1, "key": "TEAM", "name": "Team"}},
                    {"slug": "lib", "name": "Library",
                     "project": {"id": 1, "key": "TEAM", "name": "Team"}}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/api/1.0/projects/TEAM/repos/svc/pull-requests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "size": 2,
                "isLastPage": true,
                "values": [
                    {"title": "Fix bug", "createdDate": 1u64,
                     "author": {"user": {"name": "carol", "slug": "carol"}},
                     "reviewers": [{"user": {"name": "alice"}, "status": "UNAPPROVED"}],
                     "links": {"self": [{"href": "https://host/pr/1"}]}},
                    {"title": "Add docs", "createdDate": 2u64,
                     "author": {"user": {"name": "dave", "slug": "dave"}},
                     "reviewers": [],
                     "links": {"self": [{"href": "https://host/pr/2"}]}}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/api/1.0/projects/TEAM/repos/lib/pull-requests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "size": 0,
                "isLastPage": true,
                "values": []
            })))
            .mount(&server)
            .await;

        let mut cfg = ReminderConfig::default();
        cfg.bitbucket.host = server.uri();
        let client = BitbucketClient::new(&cfg).unwrap();

        let projects = vec![project(1, "TEAM", "Team")];
        let repos = collect_repositories(&client, &projects).await.unwrap();
        assert_eq!(repos.len(), 2);

        let records = collect_pull_requests(&client, &repos).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Fix bug");
        assert_eq!(records[0].repository_key, "svc");
        assert_eq!(records[0].author, "carol");
        assert_eq!(records[0].link(), "https://host/pr/1");
        assert_eq!(records[1].title, "Add docs");
    }
}
