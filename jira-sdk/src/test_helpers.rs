// ABOUTME: Test helper utilities for mocking Jira REST responses and servers
// ABOUTME: Provides mockito-based helpers and payload fixtures for unit tests

use crate::JiraClient;
use crate::credentials::CredentialSet;
use crate::dispatcher::ApiVersionMode;
use mockito::{Server, ServerGuard};
use serde_json::{Value, json};

pub async fn mock_jira_server() -> ServerGuard {
    Server::new_async().await
}

pub fn client_for(server: &ServerGuard, username: &str, mode: ApiVersionMode) -> JiraClient {
    let credentials = CredentialSet::new(&server.url(), username, "abc").unwrap();
    JiraClient::builder()
        .credentials(credentials)
        .api_version(mode)
        .build()
        .unwrap()
}

pub fn mock_myself_response() -> Value {
    json!({
        "accountId": "5b10a2844c20165700ede21g",
        "displayName": "Test User",
        "emailAddress": "test@example.com",
        "active": true
    })
}

pub fn mock_issue_response() -> Value {
    json!({
        "id": "10001",
        "key": "TEST-1",
        "self": "https://x.atlassian.net/rest/api/2/issue/10001",
        "fields": {
            "summary": "Fix login race condition",
            "status": {"name": "In Progress"},
            "issuetype": {"name": "Bug"},
            "priority": {"name": "High"},
            "assignee": {"displayName": "John Doe"},
            "reporter": {"displayName": "Jane Roe"},
            "created": "2024-01-15T10:30:00.000+0000",
            "updated": "2024-01-16T14:45:00.000+0000",
            "description": "Users see a race when logging in from two devices.",
            "labels": ["bug", "authentication"]
        }
    })
}

pub fn mock_search_response() -> Value {
    json!({
        "startAt": 0,
        "maxResults": 50,
        "total": 2,
        "issues": [
            {
                "id": "10001",
                "key": "TEST-1",
                "fields": {
                    "summary": "Fix login race condition",
                    "status": {"name": "In Progress"},
                    "assignee": {"displayName": "John Doe"},
                    "created": "2024-01-15T10:30:00.000+0000",
                    "updated": "2024-01-16T14:45:00.000+0000"
                }
            },
            {
                "id": "10002",
                "key": "TEST-2",
                "fields": {
                    "summary": "Update documentation",
                    "status": {"name": "Done"},
                    "assignee": null,
                    "created": "2024-01-01T00:00:00.000+0000",
                    "updated": "2024-01-02T00:00:00.000+0000"
                }
            }
        ]
    })
}

pub fn mock_projects_response() -> Value {
    json!([
        {
            "id": "10000",
            "key": "TEST",
            "name": "Test Project",
            "projectTypeKey": "software",
            "lead": {"displayName": "Jane Roe"}
        },
        {
            "id": "10001",
            "key": "OPS",
            "name": "Operations",
            "projectTypeKey": "service_desk"
        }
    ])
}

pub fn mock_boards_response() -> Value {
    json!({
        "maxResults": 50,
        "startAt": 0,
        "isLast": true,
        "values": [
            {"id": 1, "name": "TEST board", "type": "scrum", "location": {"displayName": "Test Project (TEST)"}}
        ]
    })
}

pub fn mock_sprints_response() -> Value {
    json!({
        "maxResults": 50,
        "startAt": 0,
        "isLast": true,
        "values": [
            {"id": 11, "name": "Sprint 1", "state": "closed", "startDate": "2024-01-01T00:00:00.000Z", "endDate": "2024-01-14T00:00:00.000Z"},
            {"id": 12, "name": "Sprint 2", "state": "active", "startDate": "2024-01-15T00:00:00.000Z", "endDate": "2024-01-28T00:00:00.000Z"},
            {"id": 13, "name": "Sprint 3", "state": "future"}
        ]
    })
}

pub fn mock_comments_response() -> Value {
    json!({
        "startAt": 0,
        "maxResults": 50,
        "total": 1,
        "comments": [
            {
                "id": "10000",
                "body": "Test comment",
                "author": {"displayName": "Test User"},
                "created": "2024-01-15T10:30:00.000+0000",
                "updated": "2024-01-15T10:30:00.000+0000"
            }
        ]
    })
}

pub fn mock_error_response(message: &str) -> Value {
    json!({
        "errorMessages": [message],
        "errors": {}
    })
}
