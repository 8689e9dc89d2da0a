//! cli::commands::certs
//!
//! SSL certificates and the domains they are attached to.
//!
//! Certificates are account-wide, not per app, so none of these verbs take
//! `--app`.

use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets, Table};

use super::{parse_args, Session};
use crate::cli::args::{CertsAdd, CertsAttach, CertsDetach, CertsInfo, CertsList, CertsRemove};
use crate::controller::types::{Cert, CreateCert};
use crate::ui::output::{expiry_suffix, format_date, short_fingerprint};
use crate::ui::Console;

pub async fn list(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<CertsList>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let certs = session
        .call(console, session.client.list_certs(session.limit(&args.limit)))
        .await?;

    if certs.items.is_empty() {
        writeln!(console.out(), "No certs")?;
        return Ok(());
    }

    writeln!(console.out(), "{}", cert_table(&certs.items, &Utc::now()))?;
    Ok(())
}

pub async fn add(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<CertsAdd>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let certificate = std::fs::read_to_string(&args.cert)
        .with_context(|| format!("failed to read certificate {}", args.cert))?;
    let key = std::fs::read_to_string(&args.key)
        .with_context(|| format!("failed to read key {}", args.key))?;
    let cert = CreateCert {
        name: args.name,
        certificate,
        key,
    };

    write!(console.out(), "Adding SSL endpoint... ")?;
    session
        .call_with_progress(console, session.client.add_cert(&cert))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

pub async fn remove(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<CertsRemove>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    write!(console.out(), "Removing {}... ", args.name)?;
    session
        .call_with_progress(console, session.client.remove_cert(&args.name))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

pub async fn info(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<CertsInfo>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    let cert = session
        .call(console, session.client.get_cert(&args.name))
        .await?;
    write!(console.out(), "{}", format_cert(&cert))?;
    Ok(())
}

pub async fn attach(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<CertsAttach>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    write!(
        console.out(),
        "Attaching certificate {} to domain {}... ",
        args.name, args.domain
    )?;
    session
        .call_with_progress(console, session.client.attach_cert(&args.name, &args.domain))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

pub async fn detach(console: &mut Console, argv: &[String]) -> Result<()> {
    let Some(args) = parse_args::<CertsDetach>(console, argv)? else {
        return Ok(());
    };
    let session = Session::load(&args.global)?;

    write!(
        console.out(),
        "Detaching certificate {} from domain {}... ",
        args.name, args.domain
    )?;
    session
        .call_with_progress(console, session.client.detach_cert(&args.name, &args.domain))
        .await?;
    writeln!(console.out(), "done")?;
    Ok(())
}

fn cert_table(certs: &[Cert], now: &DateTime<Utc>) -> Table {
    let date = |date: &Option<DateTime<Utc>>| date.as_ref().map(format_date).unwrap_or_default();

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec![
        "Name",
        "Common Name",
        "SubjectAltName",
        "Expires",
        "Fingerprint",
        "Domains",
        "Updated",
        "Created",
    ]);

    for cert in certs {
        let expires = cert
            .expires
            .as_ref()
            .map(|expires| format!("{}{}", format_date(expires), expiry_suffix(expires, now)))
            .unwrap_or_default();

        table.add_row(vec![
            cert.name.clone(),
            cert.common_name.clone(),
            cert.subject_alt_name.join(","),
            expires,
            short_fingerprint(&cert.fingerprint),
            cert.domains.join(","),
            date(&cert.updated),
            date(&cert.created),
        ]);
    }
    table
}

fn format_cert(cert: &Cert) -> String {
    let timestamp = |date: &Option<DateTime<Utc>>| {
        date.as_ref().map(ToString::to_string).unwrap_or_default()
    };
    let or_na = |values: &[String]| {
        if values.is_empty() {
            "N/A".to_string()
        } else {
            values.join(",")
        }
    };
    let domains = if cert.domains.is_empty() {
        "No connected domains".to_string()
    } else {
        cert.domains.join(",")
    };

    let field = |label: &str, value: &str| format!("{:<20}{}\n", format!("{}:", label), value);

    let mut output = format!("=== {} Certificate\n", cert.name);
    output.push_str(&field("Common Name(s)", &cert.common_name));
    output.push_str(&field("Expires At", &timestamp(&cert.expires)));
    output.push_str(&field("Starts At", &timestamp(&cert.starts)));
    output.push_str(&field("Fingerprint", &cert.fingerprint));
    output.push_str(&field("Subject Alt Name", &or_na(&cert.subject_alt_name)));
    output.push_str(&field("Issuer", &cert.issuer));
    output.push_str(&field("Subject", &cert.subject));
    output.push('\n');
    output.push_str(&field("Connected Domains", &domains));
    output.push_str(&field("Owner", &cert.owner));
    output.push_str(&field("Created", &timestamp(&cert.created)));
    output.push_str(&field("Updated", &timestamp(&cert.updated)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cert() -> Cert {
        Cert {
            name: "test-example-com".into(),
            common_name: "test.example.com".into(),
            subject_alt_name: vec![],
            domains: vec![],
            fingerprint: "12:34:56:78:90:AB:CD:EF".into(),
            issuer: "/C=US/CN=Example CA".into(),
            subject: "/CN=test.example.com".into(),
            owner: "jkirk".into(),
            expires: Some(Utc.with_ymd_and_hms(2027, 3, 1, 0, 0, 0).unwrap()),
            starts: None,
            created: Some(Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap()),
            updated: None,
        }
    }

    #[test]
    fn table_shows_relative_expiry_and_short_fingerprint() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let rendered = cert_table(&[cert()], &now).to_string();
        assert!(rendered.contains("Common Name"));
        assert!(rendered.contains("1 Mar 2027 (in 1 year)"));
        assert!(rendered.contains("12:34[...]CD:EF"));
        assert!(rendered.contains("5 Jan 2026"));
    }

    #[test]
    fn info_marks_missing_fields() {
        let text = format_cert(&cert());
        assert!(text.starts_with("=== test-example-com Certificate\n"));
        assert!(text.contains("Common Name(s):     test.example.com\n"));
        assert!(text.contains("Subject Alt Name:   N/A\n"));
        assert!(text.contains("Connected Domains:  No connected domains\n"));
        assert!(text.contains("Expires At:         2027-03-01 00:00:00 UTC\n"));
    }
}
