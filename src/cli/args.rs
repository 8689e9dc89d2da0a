//! cli::args
//!
//! Option structs for every `domain:verb`, using clap derive.
//!
//! # Parsing
//!
//! Each struct is parsed from the routed argument vector, whose first
//! element is the `domain:verb` token itself. clap treats that element as
//! the binary name, so `drydock apps:create --help` prints the generated
//! help for `apps:create` alone.
//!
//! # Shared Flags
//!
//! These flags are flattened into the verbs that use them:
//! - `-c/--config`: the profile to use (every verb)
//! - `-a/--app`: the application; detected from git when omitted
//! - `-l/--limit`: page size; the profile's limit when omitted

use clap::{ArgAction, Args, ColorChoice, Parser};

/// Profile selection, accepted by every verb.
#[derive(Args, Debug, Clone, Default)]
pub struct Global {
    /// Path to a configuration file, or a profile name under ~/.drydock.
    /// Equivalent to setting $DRYDOCK_PROFILE
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    pub config: Option<String>,
}

impl Global {
    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct AppOpt {
    /// The uniquely identifiable name for the application
    #[arg(short = 'a', long = "app", value_name = "APP")]
    pub app: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LimitOpt {
    /// The maximum number of results to display, defaults to the profile setting
    #[arg(short = 'l', long = "limit", value_name = "NUM")]
    pub limit: Option<usize>,
}

// Apps

#[derive(Parser, Debug)]
#[command(name = "apps:create", bin_name = "drydock apps:create", color = ColorChoice::Never)]
/// Creates a new application. If no <ID> is provided, one will be generated.
pub struct AppsCreate {
    /// A uniquely identifiable name for the application
    pub id: Option<String>,

    /// Do not create a git remote
    #[arg(long)]
    pub no_remote: bool,

    /// A buildpack url to use for this app
    #[arg(short = 'b', long, value_name = "BUILDPACK")]
    pub buildpack: Option<String>,

    /// Name of the remote to create
    #[arg(short = 'r', long, value_name = "REMOTE", default_value = crate::git::DEFAULT_REMOTE)]
    pub remote: String,

    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "apps:list", bin_name = "drydock apps:list", color = ColorChoice::Never)]
/// Lists applications visible to the current user.
pub struct AppsList {
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "apps:info", bin_name = "drydock apps:info", color = ColorChoice::Never)]
/// Prints info about the current application.
pub struct AppsInfo {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "apps:open", bin_name = "drydock apps:open", color = ColorChoice::Never)]
/// Opens a URL to the application in the default browser.
pub struct AppsOpen {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "apps:logs", bin_name = "drydock apps:logs", color = ColorChoice::Never)]
/// Retrieves the most recent log events.
pub struct AppsLogs {
    /// The number of lines to display
    #[arg(short = 'n', long, value_name = "LINES")]
    pub lines: Option<usize>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "apps:run", bin_name = "drydock apps:run", color = ColorChoice::Never)]
/// Runs a command inside an ephemeral app container. The exit code of the
/// command becomes the exit code of drydock.
pub struct AppsRun {
    /// The shell command to run inside the container
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "apps:destroy", bin_name = "drydock apps:destroy", color = ColorChoice::Never)]
/// Destroys an application.
pub struct AppsDestroy {
    /// Skips the prompt for the application name
    #[arg(long, value_name = "APP")]
    pub confirm: Option<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "apps:transfer", bin_name = "drydock apps:transfer", color = ColorChoice::Never)]
/// Transfer app ownership to another user.
pub struct AppsTransfer {
    /// The user that the app will be transferred to
    pub username: String,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Auth

#[derive(Parser, Debug)]
#[command(name = "auth:register", bin_name = "drydock auth:register", color = ColorChoice::Never)]
/// Registers a new user with a controller.
pub struct AuthRegister {
    /// Fully-qualified controller URI, e.g. `http://drydock.local3.example.com/`
    pub controller: String,
    /// Provide a username for the new account
    #[arg(long)]
    pub username: Option<String>,
    /// Provide a password for the new account
    #[arg(long)]
    pub password: Option<String>,
    /// Provide an email address
    #[arg(long)]
    pub email: Option<String>,
    /// Verify the controller's SSL certificate
    #[arg(long = "ssl-verify", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub ssl_verify: bool,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "auth:login", bin_name = "drydock auth:login", color = ColorChoice::Never)]
/// Logs in by authenticating against a controller.
pub struct AuthLogin {
    /// A fully-qualified controller URI, e.g. `http://drydock.local3.example.com/`
    pub controller: String,
    /// Provide a username for the account
    #[arg(long)]
    pub username: Option<String>,
    /// Provide a password for the account
    #[arg(long)]
    pub password: Option<String>,
    /// Verify the controller's SSL certificate
    #[arg(long = "ssl-verify", default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub ssl_verify: bool,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "auth:logout", bin_name = "drydock auth:logout", color = ColorChoice::Never)]
/// Logs out from a controller and clears the user session.
pub struct AuthLogout {
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "auth:passwd", bin_name = "drydock auth:passwd", color = ColorChoice::Never)]
/// Changes the password for the current user.
pub struct AuthPasswd {
    /// The current password for the account
    #[arg(long)]
    pub password: Option<String>,
    /// The new password for the account
    #[arg(long = "new-password")]
    pub new_password: Option<String>,
    /// The account's username (admins only)
    #[arg(long)]
    pub username: Option<String>,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "auth:whoami", bin_name = "drydock auth:whoami", color = ColorChoice::Never)]
/// Displays the currently logged in user.
pub struct AuthWhoami {
    /// Display all information about the user
    #[arg(long)]
    pub all: bool,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "auth:cancel", bin_name = "drydock auth:cancel", color = ColorChoice::Never)]
/// Cancels and removes the current account.
pub struct AuthCancel {
    /// Provide a username for the account
    #[arg(long)]
    pub username: Option<String>,
    /// Provide a password for the account
    #[arg(long)]
    pub password: Option<String>,
    /// Force "yes" when prompted
    #[arg(long)]
    pub yes: bool,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "auth:regenerate", bin_name = "drydock auth:regenerate", color = ColorChoice::Never)]
/// Regenerates auth token, defaults to regenerating token for the current user.
pub struct AuthRegenerate {
    /// Specify user to regenerate. Requires admin privileges
    #[arg(short = 'u', long)]
    pub username: Option<String>,
    /// Regenerate token for every user. Requires admin privileges
    #[arg(long, conflicts_with = "username")]
    pub all: bool,
    #[command(flatten)]
    pub global: Global,
}

// Builds

#[derive(Parser, Debug)]
#[command(name = "builds:list", bin_name = "drydock builds:list", color = ColorChoice::Never)]
/// Lists build history for an application.
pub struct BuildsList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "builds:create", bin_name = "drydock builds:create", color = ColorChoice::Never)]
/// Imports an image and deploys it as a new release. A Procfile in the
/// current directory supplies the default process types.
pub struct BuildsCreate {
    /// A fully-qualified docker image, including its tag
    pub image: String,
    /// A YAML string used to supply a Procfile to the application
    #[arg(short = 'p', long, value_name = "PROCFILE")]
    pub procfile: Option<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Certificates

#[derive(Parser, Debug)]
#[command(name = "certs:list", bin_name = "drydock certs:list", color = ColorChoice::Never)]
/// Show certificate information for an SSL application.
pub struct CertsList {
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "certs:add", bin_name = "drydock certs:add", color = ColorChoice::Never)]
/// Binds a certificate/key pair to an application.
pub struct CertsAdd {
    /// Name of the certificate to reference it by
    pub name: String,
    /// The public key of the SSL certificate
    pub cert: String,
    /// The private key of the SSL certificate
    pub key: String,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "certs:remove", bin_name = "drydock certs:remove", color = ColorChoice::Never)]
/// Removes a certificate/key pair from the application.
pub struct CertsRemove {
    /// The name of the cert to remove from the app
    pub name: String,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "certs:info", bin_name = "drydock certs:info", color = ColorChoice::Never)]
/// Fetch more detailed information about a certificate.
pub struct CertsInfo {
    /// Name of the certificate to get information about
    pub name: String,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "certs:attach", bin_name = "drydock certs:attach", color = ColorChoice::Never)]
/// Attach a certificate to a domain.
pub struct CertsAttach {
    /// Name of the certificate to attach
    pub name: String,
    /// Common name of the domain to attach to
    pub domain: String,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "certs:detach", bin_name = "drydock certs:detach", color = ColorChoice::Never)]
/// Detach a certificate from a domain.
pub struct CertsDetach {
    /// Name of the certificate to detach
    pub name: String,
    /// Common name of the domain to detach from
    pub domain: String,
    #[command(flatten)]
    pub global: Global,
}

// Config

#[derive(Parser, Debug)]
#[command(name = "config:list", bin_name = "drydock config:list", color = ColorChoice::Never)]
/// Lists environment variables for an application.
pub struct ConfigList {
    /// Print output on one line
    #[arg(long)]
    pub oneline: bool,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "config:set", bin_name = "drydock config:set", color = ColorChoice::Never)]
/// Sets environment variables for an application.
pub struct ConfigSet {
    /// Variable assignments, e.g. MODE=test. SSH_KEY may name a private key file
    #[arg(required = true, value_name = "VAR=VALUE")]
    pub assignments: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "config:unset", bin_name = "drydock config:unset", color = ColorChoice::Never)]
/// Unsets environment variables for an application.
pub struct ConfigUnset {
    /// The variable to remove from the application's environment
    #[arg(required = true, value_name = "KEY")]
    pub keys: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "config:pull", bin_name = "drydock config:pull", color = ColorChoice::Never)]
/// Extract all environment variables from an application for local use.
/// Piped output prints the variables instead of writing `.env`.
pub struct ConfigPull {
    /// Prompts for each value to be overwritten
    #[arg(short = 'i', long)]
    pub interactive: bool,
    /// Allows you to have the pull overwrite keys in .env
    #[arg(short = 'o', long)]
    pub overwrite: bool,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "config:push", bin_name = "drydock config:push", color = ColorChoice::Never)]
/// Sets environment variables for an application from a file, or from
/// standard input when it is piped.
pub struct ConfigPush {
    /// A path leading to an environment file
    #[arg(short = 'p', long, value_name = "PATH", default_value = ".env")]
    pub path: String,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Domains

#[derive(Parser, Debug)]
#[command(name = "domains:add", bin_name = "drydock domains:add", color = ColorChoice::Never)]
/// Binds a domain to an application.
pub struct DomainsAdd {
    /// The domain name to be bound to the application, such as `domain.example.com`
    pub domain: String,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "domains:list", bin_name = "drydock domains:list", color = ColorChoice::Never)]
/// Lists domains bound to an application.
pub struct DomainsList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "domains:remove", bin_name = "drydock domains:remove", color = ColorChoice::Never)]
/// Unbinds a domain for an application.
pub struct DomainsRemove {
    /// The domain name to be removed from the application
    pub domain: String,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Git

#[derive(Parser, Debug)]
#[command(name = "git:remote", bin_name = "drydock git:remote", color = ColorChoice::Never)]
/// Adds git remote of application to repository.
pub struct GitRemote {
    /// Name of the remote to create
    #[arg(short = 'r', long, value_name = "REMOTE", default_value = crate::git::DEFAULT_REMOTE)]
    pub remote: String,
    /// Overwrite the remote if it already exists
    #[arg(short = 'f', long)]
    pub force: bool,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "git:remove", bin_name = "drydock git:remove", color = ColorChoice::Never)]
/// Removes git remotes of application from repository.
pub struct GitRemove {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Healthchecks

#[derive(Parser, Debug)]
#[command(name = "healthchecks:list", bin_name = "drydock healthchecks:list", color = ColorChoice::Never)]
/// Lists healthchecks for an application.
pub struct HealthchecksList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "healthchecks:set", bin_name = "drydock healthchecks:set", color = ColorChoice::Never)]
/// Sets a liveness or readiness probe for an application.
///
/// `httpGet` and `tcpSocket` probes take a port; `exec` probes take the
/// command to run, e.g. `healthchecks:set liveness exec -- cat /tmp/healthy`.
pub struct HealthchecksSet {
    /// `liveness` or `readiness`
    pub health_type: String,
    /// `httpGet`, `exec` or `tcpSocket`
    pub probe_type: String,
    /// The port for httpGet/tcpSocket probes, or the exec command
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
    /// The path for an httpGet probe
    #[arg(long, default_value = "/")]
    pub path: String,
    /// An HTTP header for an httpGet probe, as `name:value`
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,
    /// Seconds after the container starts before the probe runs
    #[arg(long = "initial-delay", default_value_t = 50)]
    pub initial_delay: u32,
    /// Seconds after which the probe times out
    #[arg(long, default_value_t = 50)]
    pub timeout: u32,
    /// How often, in seconds, to perform the probe
    #[arg(long, default_value_t = 10)]
    pub period: u32,
    /// Consecutive successes for the probe to be considered successful
    #[arg(long = "success-threshold", default_value_t = 1)]
    pub success_threshold: u32,
    /// Consecutive failures for the probe to be considered failed
    #[arg(long = "failure-threshold", default_value_t = 3)]
    pub failure_threshold: u32,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "healthchecks:unset", bin_name = "drydock healthchecks:unset", color = ColorChoice::Never)]
/// Unsets healthchecks for an application.
pub struct HealthchecksUnset {
    /// `liveness` or `readiness`
    #[arg(required = true, value_name = "TYPE")]
    pub health_types: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Keys

#[derive(Parser, Debug)]
#[command(name = "keys:list", bin_name = "drydock keys:list", color = ColorChoice::Never)]
/// Lists SSH keys for the logged in user.
pub struct KeysList {
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "keys:add", bin_name = "drydock keys:add", color = ColorChoice::Never)]
/// Adds SSH keys for the logged in user. Without a path, offers the keys
/// found in ~/.ssh.
pub struct KeysAdd {
    /// A local file path to an SSH public key used to push application code
    pub key: Option<String>,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "keys:remove", bin_name = "drydock keys:remove", color = ColorChoice::Never)]
/// Removes an SSH key for the logged in user.
pub struct KeysRemove {
    /// The SSH public key to revoke source code push access
    pub key: String,
    #[command(flatten)]
    pub global: Global,
}

// Limits

#[derive(Args, Debug, Clone, Default)]
pub struct LimitKindOpt {
    /// Limit CPU shares
    #[arg(long, conflicts_with = "memory")]
    pub cpu: bool,
    /// Limit memory (the default)
    #[arg(short = 'm', long)]
    pub memory: bool,
}

impl LimitKindOpt {
    pub fn kind(&self) -> crate::core::types::LimitKind {
        if self.cpu {
            crate::core::types::LimitKind::Cpu
        } else {
            crate::core::types::LimitKind::Memory
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "limits:list", bin_name = "drydock limits:list", color = ColorChoice::Never)]
/// Lists resource limits for an application.
pub struct LimitsList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "limits:set", bin_name = "drydock limits:set", color = ColorChoice::Never)]
/// Sets resource limits for an application. The limit applies to each pod
/// of the process type. Memory takes B, K, M or G units; cpu takes a number
/// of CPUs or milli units such as 500m.
pub struct LimitsSet {
    /// Limits as <type>=<limit>, e.g. web=1G
    #[arg(required = true, value_name = "TYPE=LIMIT")]
    pub limits: Vec<String>,
    #[command(flatten)]
    pub kind: LimitKindOpt,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "limits:unset", bin_name = "drydock limits:unset", color = ColorChoice::Never)]
/// Unsets resource limits for an application.
pub struct LimitsUnset {
    /// The process types to unset
    #[arg(required = true, value_name = "TYPE")]
    pub types: Vec<String>,
    #[command(flatten)]
    pub kind: LimitKindOpt,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Permissions

#[derive(Parser, Debug)]
#[command(name = "perms:list", bin_name = "drydock perms:list", color = ColorChoice::Never)]
/// Lists all users with permission to use an app, or lists all users with
/// system administrator privileges.
pub struct PermsList {
    /// List all users with administrative privileges
    #[arg(long, conflicts_with = "app")]
    pub admin: bool,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "perms:create", bin_name = "drydock perms:create", color = ColorChoice::Never)]
/// Gives another user permission to use an app, or gives another user
/// system administrator privileges.
pub struct PermsCreate {
    /// The name of the user to be granted permission
    pub username: String,
    /// Grants the user administrative privileges
    #[arg(long, conflicts_with = "app")]
    pub admin: bool,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "perms:delete", bin_name = "drydock perms:delete", color = ColorChoice::Never)]
/// Revokes another user's permission to use an app, or revokes another
/// user's system administrator privileges.
pub struct PermsDelete {
    /// The name of the user to be revoked
    pub username: String,
    /// Revokes the user's administrative privileges
    #[arg(long, conflicts_with = "app")]
    pub admin: bool,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Processes

#[derive(Parser, Debug)]
#[command(name = "ps:list", bin_name = "drydock ps:list", color = ColorChoice::Never)]
/// Lists processes servicing an application.
pub struct PsList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "ps:restart", bin_name = "drydock ps:restart", color = ColorChoice::Never)]
/// Restart an application, a process type or a specific process.
pub struct PsRestart {
    /// The process type, such as `web`, or a process name
    #[arg(value_name = "TYPE")]
    pub target: Option<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "ps:scale", bin_name = "drydock ps:scale", color = ColorChoice::Never)]
/// Scales an application's processes by type.
pub struct PsScale {
    /// Targets as <type>=<num>, e.g. web=4 worker=2
    #[arg(required = true, value_name = "TYPE=NUM")]
    pub targets: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Registry

#[derive(Parser, Debug)]
#[command(name = "registry:list", bin_name = "drydock registry:list", color = ColorChoice::Never)]
/// Lists private registry information for an application.
pub struct RegistryList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "registry:set", bin_name = "drydock registry:set", color = ColorChoice::Never)]
/// Sets registry information for an application. Valid keys are
/// `username` and `password`.
pub struct RegistrySet {
    /// Credentials as <key>=<value>
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "registry:unset", bin_name = "drydock registry:unset", color = ColorChoice::Never)]
/// Unsets registry information for an application.
pub struct RegistryUnset {
    /// The registry keys to remove
    #[arg(required = true, value_name = "KEY")]
    pub keys: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Releases

#[derive(Parser, Debug)]
#[command(name = "releases:list", bin_name = "drydock releases:list", color = ColorChoice::Never)]
/// Lists release history for an application.
pub struct ReleasesList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "releases:info", bin_name = "drydock releases:info", color = ColorChoice::Never)]
/// Prints info about a particular release.
pub struct ReleasesInfo {
    /// The release version, such as 'v1' or '1'
    pub version: String,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "releases:rollback", bin_name = "drydock releases:rollback", color = ColorChoice::Never)]
/// Rolls back to a previous application release.
pub struct ReleasesRollback {
    /// The release version to roll back to; the previous release when omitted
    pub version: Option<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Routing

#[derive(Parser, Debug)]
#[command(name = "routing:info", bin_name = "drydock routing:info", color = ColorChoice::Never)]
/// Prints info about the current application's routability.
pub struct RoutingInfo {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "routing:enable", bin_name = "drydock routing:enable", color = ColorChoice::Never)]
/// Enables routability for an app.
pub struct RoutingEnable {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "routing:disable", bin_name = "drydock routing:disable", color = ColorChoice::Never)]
/// Disables routability for an app.
pub struct RoutingDisable {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Shortcuts

#[derive(Parser, Debug)]
#[command(name = "shortcuts:list", bin_name = "drydock shortcuts:list", color = ColorChoice::Never)]
/// Lists all command shortcuts.
pub struct ShortcutsList {
    #[command(flatten)]
    pub global: Global,
}

// Tags

#[derive(Parser, Debug)]
#[command(name = "tags:list", bin_name = "drydock tags:list", color = ColorChoice::Never)]
/// Lists tags for an application.
pub struct TagsList {
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "tags:set", bin_name = "drydock tags:set", color = ColorChoice::Never)]
/// Sets tags for an application. A tag is a key/value pair used to tag an
/// application's containers, e.g. `environ=production`.
pub struct TagsSet {
    /// Tags as <key>=<value>
    #[arg(required = true, value_name = "KEY=VALUE")]
    pub tags: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

#[derive(Parser, Debug)]
#[command(name = "tags:unset", bin_name = "drydock tags:unset", color = ColorChoice::Never)]
/// Unsets tags for an application.
pub struct TagsUnset {
    /// The tag keys to remove
    #[arg(required = true, value_name = "KEY")]
    pub keys: Vec<String>,
    #[command(flatten)]
    pub app: AppOpt,
    #[command(flatten)]
    pub global: Global,
}

// Users

#[derive(Parser, Debug)]
#[command(name = "users:list", bin_name = "drydock users:list", color = ColorChoice::Never)]
/// Lists all registered users. Requires admin privileges.
pub struct UsersList {
    #[command(flatten)]
    pub limit: LimitOpt,
    #[command(flatten)]
    pub global: Global,
}

// Version

#[derive(Parser, Debug)]
#[command(name = "version", bin_name = "drydock version", color = ColorChoice::Never)]
/// Displays the client version.
pub struct Version {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn every_verb_definition_is_valid() {
        AppsCreate::command().debug_assert();
        AuthRegister::command().debug_assert();
        ConfigPush::command().debug_assert();
        HealthchecksSet::command().debug_assert();
        LimitsSet::command().debug_assert();
        PermsList::command().debug_assert();
        ReleasesRollback::command().debug_assert();
    }

    #[test]
    fn shared_flags_parse() {
        let args = BuildsList::try_parse_from(argv(&[
            "builds:list", "-a", "foo", "-l", "5", "-c", "staging",
        ]))
        .unwrap();
        assert_eq!(args.app.app.as_deref(), Some("foo"));
        assert_eq!(args.limit.limit, Some(5));
        assert_eq!(args.global.config(), Some("staging"));
    }

    #[test]
    fn create_defaults_the_remote() {
        let args = AppsCreate::try_parse_from(argv(&["apps:create"])).unwrap();
        assert_eq!(args.remote, "drydock");
        assert!(args.id.is_none());
        assert!(!args.no_remote);
    }

    #[test]
    fn ssl_verify_takes_a_value() {
        let args = AuthLogin::try_parse_from(argv(&[
            "auth:login", "http://d.example.com", "--ssl-verify=false",
        ]))
        .unwrap();
        assert!(!args.ssl_verify);

        let args =
            AuthLogin::try_parse_from(argv(&["auth:login", "http://d.example.com"])).unwrap();
        assert!(args.ssl_verify);
    }

    #[test]
    fn run_keeps_command_flags() {
        let args = AppsRun::try_parse_from(argv(&["apps:run", "-a", "foo", "--", "ls", "-la"]))
            .unwrap();
        assert_eq!(args.command, argv(&["ls", "-la"]));
    }

    #[test]
    fn limits_default_to_memory() {
        use crate::core::types::LimitKind;

        let args = LimitsSet::try_parse_from(argv(&["limits:set", "web=1G"])).unwrap();
        assert_eq!(args.kind.kind(), LimitKind::Memory);

        let args = LimitsSet::try_parse_from(argv(&["limits:set", "--cpu", "web=500m"])).unwrap();
        assert_eq!(args.kind.kind(), LimitKind::Cpu);
    }

    #[test]
    fn admin_and_app_conflict() {
        assert!(PermsCreate::try_parse_from(argv(&["perms:create", "bob", "--admin", "-a", "x"]))
            .is_err());
    }

    #[test]
    fn help_is_requested_through_the_error() {
        let err = ConfigList::try_parse_from(argv(&["config:list", "--help"])).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
