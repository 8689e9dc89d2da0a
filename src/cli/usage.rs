//! cli::usage
//!
//! The command table: every built-in domain, its verbs and its usage text.

/// Top-level help, printed by `drydock help`.
pub const USAGE: &str = "
The drydock command-line client issues API calls to a drydock controller.

Usage: drydock <command> [<args>...]

Option flags::

  -h --help     display help information
  -v --version  display client version
  -c --config   (optional) path to configuration file. Equivalent to
                setting $DRYDOCK_PROFILE. Defaults to ~/.drydock/config.json.
                If not set to a filepath, will assume location ~/.drydock/<value>.json

Auth commands, use 'drydock help auth' to learn more::

  register      register a new user with a controller
  login         login to a controller
  logout        logout from the current controller

Subcommands, use 'drydock help [subcommand]' to learn more::

  apps          manage applications used to provide services
  builds        manage builds created using 'git push'
  certs         manage SSL endpoints for an app
  config        manage environment variables that define app config
  domains       manage and assign domain names to your applications
  git           manage git for applications
  healthchecks  manage healthchecks for applications
  keys          manage ssh keys used for 'git push' deployments
  limits        manage resource limits for your application
  perms         manage permissions for applications
  ps            manage processes inside an app container
  registry      manage private registry information for your application
  releases      manage releases of an application
  routing       manage routability of an application
  tags          manage tags for application containers
  users         manage users
  version       display client version

Shortcut commands, use 'drydock shortcuts' to see all::

  create        create a new application
  destroy       destroy an application
  info          view information about the current app
  logs          view aggregated log info for the app
  open          open a URL to the app in a browser
  pull          imports an image and deploys as a new release
  run           run a command in an ephemeral app container
  scale         scale processes by type (web=2, worker=1)

Use 'git push drydock master' to deploy to an application.
";

/// One-line usage printed to standard error on a bad command.
pub const SHORT_USAGE: &str = "Usage: drydock <command> [<args>...]\n";

/// Printed when nothing matches the command.
pub const NO_MATCH: &str = "Found no matching command, try 'drydock help'\n";

/// A built-in command namespace.
#[derive(Debug)]
pub struct DomainSpec {
    pub name: &'static str,
    /// Verb run for the bare domain; `None` prints the usage instead
    pub default_verb: Option<&'static str>,
    pub verbs: &'static [&'static str],
    pub usage: &'static str,
}

impl DomainSpec {
    pub fn has_verb(&self, verb: &str) -> bool {
        self.verbs.contains(&verb)
    }
}

pub const DOMAINS: &[DomainSpec] = &[
    DomainSpec {
        name: "apps",
        default_verb: Some("list"),
        verbs: &["create", "list", "info", "open", "logs", "run", "destroy", "transfer"],
        usage: "
Valid commands for apps:

apps:create        create a new application
apps:list          list accessible applications
apps:info          view info about an application
apps:open          open the application in a browser
apps:logs          view aggregated application logs
apps:run           run a command in an ephemeral app container
apps:destroy       destroy an application
apps:transfer      transfer app ownership to another user

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "auth",
        default_verb: None,
        verbs: &["register", "login", "logout", "passwd", "whoami", "cancel", "regenerate"],
        usage: "
Valid commands for auth:

auth:register          register a new user
auth:login             authenticate against a controller
auth:logout            clear the current user session
auth:passwd            change the password for the current user
auth:whoami            display the current user
auth:cancel            remove the current user account
auth:regenerate        regenerate user tokens

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "builds",
        default_verb: Some("list"),
        verbs: &["list", "create"],
        usage: "
Valid commands for builds:

builds:list        list build history for an application
builds:create      imports an image and deploys as a new release

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "certs",
        default_verb: Some("list"),
        verbs: &["list", "add", "remove", "info", "attach", "detach"],
        usage: "
Valid commands for certs:

certs:list            list SSL certificates for an app
certs:add             add an SSL certificate to an app
certs:remove          remove an SSL certificate from an app
certs:info            get detailed informaton about the certificate
certs:attach          attach an SSL certificate to a domain
certs:detach          detach an SSL certificate from a domain

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "config",
        default_verb: Some("list"),
        verbs: &["list", "set", "unset", "pull", "push"],
        usage: "
Valid commands for config:

config:list        list environment variables for an app
config:set         set environment variables for an app
config:unset       unset environment variables for an app
config:pull        extract environment variables to .env
config:push        set environment variables from .env

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "domains",
        default_verb: Some("list"),
        verbs: &["list", "add", "remove"],
        usage: "
Valid commands for domains:

domains:add           bind a domain to an application
domains:list          list domains bound to an application
domains:remove        unbind a domain from an application

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "git",
        default_verb: None,
        verbs: &["remote", "remove"],
        usage: "
Valid commands for git:

git:remote          Adds git remote of application to repository
git:remove          Removes git remote of application from repository

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "healthchecks",
        default_verb: Some("list"),
        verbs: &["list", "set", "unset"],
        usage: "
Valid commands for healthchecks:

healthchecks:list        list healthchecks for an app
healthchecks:set         set healthchecks for an app
healthchecks:unset       unset healthchecks for an app

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "keys",
        default_verb: Some("list"),
        verbs: &["list", "add", "remove"],
        usage: "
Valid commands for SSH keys:

keys:list        list SSH keys for the logged in user
keys:add         add an SSH key
keys:remove      remove an SSH key

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "limits",
        default_verb: Some("list"),
        verbs: &["list", "set", "unset"],
        usage: "
Valid commands for limits:

limits:list        list resource limits for an app
limits:set         set resource limits for an app
limits:unset       unset resource limits for an app

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "perms",
        default_verb: Some("list"),
        verbs: &["list", "create", "delete"],
        usage: "
Valid commands for perms:

perms:list            list permissions granted on an app
perms:create          create a new permission for a user
perms:delete          delete a permission for a user

Use 'drydock help perms:[command]' to learn more.
",
    },
    DomainSpec {
        name: "ps",
        default_verb: Some("list"),
        verbs: &["list", "restart", "scale"],
        usage: "
Valid commands for processes:

ps:list        list application processes
ps:restart     restart an application or its process types
ps:scale       scale processes (e.g. web=4 worker=2)

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "registry",
        default_verb: Some("list"),
        verbs: &["list", "set", "unset"],
        usage: "
Valid commands for registry:

registry:list        list registry info for an app
registry:set         set registry info for an app
registry:unset       unset registry info for an app

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "releases",
        default_verb: Some("list"),
        verbs: &["list", "info", "rollback"],
        usage: "
Valid commands for releases:

releases:list        list an application's release history
releases:info        print information about a specific release
releases:rollback    return to a previous release

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "routing",
        default_verb: Some("info"),
        verbs: &["info", "enable", "disable"],
        usage: "
Valid commands for routing:

routing:info       view routability of an application
routing:enable     enable routing for an app
routing:disable    disable routing for an app

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "shortcuts",
        default_verb: Some("list"),
        verbs: &["list"],
        usage: "
Valid commands for shortcuts:

shortcuts:list       list all command shortcuts

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "tags",
        default_verb: Some("list"),
        verbs: &["list", "set", "unset"],
        usage: "
Valid commands for tags:

tags:list        list tags for an app
tags:set         set tags for an app
tags:unset       unset tags for an app

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "users",
        default_verb: Some("list"),
        verbs: &["list"],
        usage: "
Valid commands for users:

users:list        list all registered users

Use 'drydock help [command]' to learn more.
",
    },
    DomainSpec {
        name: "version",
        default_verb: Some("show"),
        verbs: &["show"],
        usage: "
Displays the client version.

Usage: drydock version

Use 'drydock help [command]' to learn more.
",
    },
];

/// Look up a built-in domain.
pub fn domain(name: &str) -> Option<&'static DomainSpec> {
    DOMAINS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_verb_is_a_verb() {
        for spec in DOMAINS {
            if let Some(verb) = spec.default_verb {
                assert!(spec.has_verb(verb), "{} default {}", spec.name, verb);
            }
        }
    }

    #[test]
    fn help_and_bare_domains_are_known() {
        assert!(domain("apps").is_some());
        assert!(domain("auth").unwrap().default_verb.is_none());
        assert!(domain("help").is_none());
        assert!(domain("bogus").is_none());
    }
}
