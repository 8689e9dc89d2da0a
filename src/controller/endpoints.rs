//! controller::endpoints
//!
//! One method per controller operation, grouped by resource.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::client::ControllerClient;
use super::error::ApiError;
use super::types::{
    AdminPerm, App, AppRunResult, Build, Cert, Config, ConfigUpdate, CreateBuild, CreateCert,
    Domain, Key, ListResult, Pod, Registration, Release, User,
};

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct PermsResponse {
    users: Vec<String>,
}

#[derive(Deserialize)]
struct VersionResponse {
    version: u32,
}

// Auth

impl ControllerClient {
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.post("/v2/auth/register/", registration).await
    }

    /// Exchange credentials for a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = json!({ "username": username, "password": password });
        let response: TokenResponse = self.post_json("/v2/auth/login/", &body).await?;
        Ok(response.token)
    }

    /// Change a password. `username` is set when an admin changes someone else's.
    pub async fn change_password(
        &self,
        username: Option<&str>,
        password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let mut body = json!({ "password": password, "new_password": new_password });
        if let Some(username) = username {
            body["username"] = json!(username);
        }
        self.post("/v2/auth/passwd/", &body).await
    }

    /// Delete an account. `None` cancels the caller's own account.
    pub async fn cancel_account(&self, username: Option<&str>) -> Result<(), ApiError> {
        let body = match username {
            Some(username) => json!({ "username": username }),
            None => json!({}),
        };
        self.delete_with_body("/v2/auth/cancel/", &body).await
    }

    pub async fn whoami(&self) -> Result<User, ApiError> {
        self.get_json("/v2/auth/whoami/").await
    }

    /// Regenerate tokens. Returns the new token when a single user's was rotated.
    pub async fn regenerate_token(
        &self,
        username: Option<&str>,
        all: bool,
    ) -> Result<Option<String>, ApiError> {
        let body = if all {
            json!({ "all": true })
        } else if let Some(username) = username {
            json!({ "username": username })
        } else {
            json!({})
        };

        let url = self.url("/v2/auth/tokens/")?;
        let response = self.send(Method::POST, url, Some(&body)).await?;
        if all {
            return Ok(None);
        }
        let response: TokenResponse = super::client::decode(response).await?;
        Ok(Some(response.token))
    }
}

// Apps

impl ControllerClient {
    /// Create an app; the controller picks a name when `id` is `None`.
    pub async fn create_app(&self, id: Option<&str>) -> Result<App, ApiError> {
        let body = match id {
            Some(id) => json!({ "id": id }),
            None => json!({}),
        };
        self.post_json("/v2/apps/", &body).await
    }

    pub async fn list_apps(&self, limit: usize) -> Result<ListResult<App>, ApiError> {
        self.list("/v2/apps/", limit).await
    }

    pub async fn get_app(&self, app: &str) -> Result<App, ApiError> {
        self.get_json(&format!("/v2/apps/{}/", app)).await
    }

    pub async fn delete_app(&self, app: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v2/apps/{}/", app)).await
    }

    pub async fn transfer_app(&self, app: &str, owner: &str) -> Result<(), ApiError> {
        self.post(&format!("/v2/apps/{}/", app), &json!({ "owner": owner }))
            .await
    }

    /// Fetch recent log lines. `0` leaves the count to the controller.
    pub async fn app_logs(&self, app: &str, lines: usize) -> Result<String, ApiError> {
        let mut url = self.url(&format!("/v2/apps/{}/logs", app))?;
        if lines > 0 {
            url.query_pairs_mut()
                .append_pair("log_lines", &lines.to_string());
        }

        let response = self.send::<()>(Method::GET, url, None).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        // Logs arrive as a JSON string; older controllers send plain text.
        Ok(serde_json::from_str::<String>(&text).unwrap_or(text))
    }

    pub async fn run_command(&self, app: &str, command: &str) -> Result<AppRunResult, ApiError> {
        self.post_json(
            &format!("/v2/apps/{}/run", app),
            &json!({ "command": command }),
        )
        .await
    }
}

// Builds

impl ControllerClient {
    pub async fn list_builds(&self, app: &str, limit: usize) -> Result<ListResult<Build>, ApiError> {
        self.list(&format!("/v2/apps/{}/builds/", app), limit).await
    }

    pub async fn create_build(&self, app: &str, build: &CreateBuild) -> Result<Build, ApiError> {
        self.post_json(&format!("/v2/apps/{}/builds/", app), build)
            .await
    }
}

// Config

impl ControllerClient {
    pub async fn get_config(&self, app: &str) -> Result<Config, ApiError> {
        self.get_json(&format!("/v2/apps/{}/config/", app)).await
    }

    /// Send a partial update; the controller merges it and returns the result.
    pub async fn set_config(&self, app: &str, update: &ConfigUpdate) -> Result<Config, ApiError> {
        self.post_json(&format!("/v2/apps/{}/config/", app), update)
            .await
    }
}

// Domains

impl ControllerClient {
    pub async fn list_domains(
        &self,
        app: &str,
        limit: usize,
    ) -> Result<ListResult<Domain>, ApiError> {
        self.list(&format!("/v2/apps/{}/domains/", app), limit)
            .await
    }

    pub async fn add_domain(&self, app: &str, domain: &str) -> Result<Domain, ApiError> {
        self.post_json(
            &format!("/v2/apps/{}/domains/", app),
            &json!({ "domain": domain }),
        )
        .await
    }

    pub async fn remove_domain(&self, app: &str, domain: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v2/apps/{}/domains/{}", app, domain))
            .await
    }
}

// Certificates

impl ControllerClient {
    pub async fn list_certs(&self, limit: usize) -> Result<ListResult<Cert>, ApiError> {
        self.list("/v2/certs/", limit).await
    }

    pub async fn add_cert(&self, cert: &CreateCert) -> Result<Cert, ApiError> {
        self.post_json("/v2/certs/", cert).await
    }

    pub async fn get_cert(&self, name: &str) -> Result<Cert, ApiError> {
        self.get_json(&format!("/v2/certs/{}", name)).await
    }

    pub async fn remove_cert(&self, name: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v2/certs/{}", name)).await
    }

    pub async fn attach_cert(&self, name: &str, domain: &str) -> Result<(), ApiError> {
        self.post(
            &format!("/v2/certs/{}/domain/", name),
            &json!({ "domain": domain }),
        )
        .await
    }

    pub async fn detach_cert(&self, name: &str, domain: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v2/certs/{}/domain/{}", name, domain))
            .await
    }
}

// Processes

impl ControllerClient {
    pub async fn list_pods(&self, app: &str, limit: usize) -> Result<ListResult<Pod>, ApiError> {
        self.list(&format!("/v2/apps/{}/pods/", app), limit).await
    }

    pub async fn scale(&self, app: &str, targets: &BTreeMap<String, u32>) -> Result<(), ApiError> {
        self.post(&format!("/v2/apps/{}/scale/", app), targets).await
    }

    /// Restart every process, one type, or one named process.
    pub async fn restart(
        &self,
        app: &str,
        process_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Pod>, ApiError> {
        let path = match (process_type, name) {
            (Some(kind), Some(name)) => format!("/v2/apps/{}/pods/{}/{}/restart/", app, kind, name),
            (Some(kind), None) => format!("/v2/apps/{}/pods/{}/restart/", app, kind),
            _ => format!("/v2/apps/{}/pods/restart/", app),
        };
        self.post_json(&path, &json!({})).await
    }
}

// SSH keys

impl ControllerClient {
    pub async fn list_keys(&self, limit: usize) -> Result<ListResult<Key>, ApiError> {
        self.list("/v2/keys/", limit).await
    }

    pub async fn add_key(&self, id: &str, public: &str) -> Result<Key, ApiError> {
        self.post_json("/v2/keys/", &json!({ "id": id, "public": public }))
            .await
    }

    pub async fn remove_key(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v2/keys/{}", id)).await
    }
}

// Permissions

impl ControllerClient {
    pub async fn list_app_perms(&self, app: &str) -> Result<Vec<String>, ApiError> {
        let response: PermsResponse = self
            .get_json(&format!("/v2/apps/{}/perms/", app))
            .await?;
        Ok(response.users)
    }

    pub async fn add_app_perm(&self, app: &str, username: &str) -> Result<(), ApiError> {
        self.post(
            &format!("/v2/apps/{}/perms/", app),
            &json!({ "username": username }),
        )
        .await
    }

    pub async fn remove_app_perm(&self, app: &str, username: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v2/apps/{}/perms/{}", app, username))
            .await
    }

    pub async fn list_admins(&self, limit: usize) -> Result<ListResult<AdminPerm>, ApiError> {
        self.list("/v2/admin/perms/", limit).await
    }

    pub async fn add_admin(&self, username: &str) -> Result<(), ApiError> {
        self.post("/v2/admin/perms/", &json!({ "username": username }))
            .await
    }

    pub async fn remove_admin(&self, username: &str) -> Result<(), ApiError> {
        self.delete(&format!("/v2/admin/perms/{}", username)).await
    }
}

// Releases

impl ControllerClient {
    pub async fn list_releases(
        &self,
        app: &str,
        limit: usize,
    ) -> Result<ListResult<Release>, ApiError> {
        self.list(&format!("/v2/apps/{}/releases/", app), limit)
            .await
    }

    pub async fn get_release(&self, app: &str, version: u32) -> Result<Release, ApiError> {
        self.get_json(&format!("/v2/apps/{}/releases/v{}/", app, version))
            .await
    }

    /// Roll back to `version`, or to the previous release. Returns the new version.
    pub async fn rollback(&self, app: &str, version: Option<u32>) -> Result<u32, ApiError> {
        let body = match version {
            Some(version) => json!({ "version": version }),
            None => json!({}),
        };
        let response: VersionResponse = self
            .post_json(&format!("/v2/apps/{}/releases/rollback/", app), &body)
            .await?;
        Ok(response.version)
    }
}

// Users

impl ControllerClient {
    pub async fn list_users(&self, limit: usize) -> Result<ListResult<User>, ApiError> {
        self.list("/v2/users/", limit).await
    }
}
