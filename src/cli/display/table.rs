//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::cluster::{AppliedArtifacts, ConnectionPlan};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the resolved connection as a two-column summary
    pub fn render_connection_plan(&self, plan: &ConnectionPlan) -> String {
        let auth = plan.settings.credentials.auth;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("PROPERTY").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
            ]);

        table.add_row(vec![
            Cell::new("Cluster"),
            Cell::new(format!("{} ({})", plan.cluster_id, plan.cluster_name)),
        ]);
        table.add_row(vec![Cell::new("Region"), Cell::new(&plan.region)]);
        table.add_row(vec![
            Cell::new("Leader"),
            Cell::new(plan.primary.private_dns_name()).fg(self.theme.info),
        ]);
        if let Some(public) = plan.primary.public_dns_name() {
            table.add_row(vec![Cell::new("Leader (public)"), Cell::new(public)]);
        }
        table.add_row(vec![Cell::new("Livy URL"), Cell::new(plan.livy_url())]);
        table.add_row(vec![
            Cell::new("Authentication"),
            Cell::new(format!("{} {}", StatusIcon::auth_icon(auth), auth.as_str()))
                .fg(self.theme.auth_color(auth)),
        ]);
        table.add_row(vec![
            Cell::new("User"),
            Cell::new(&plan.settings.credentials.username),
        ]);

        let search = if plan.dns_search.overridden {
            plan.dns_search.domain.clone()
        } else {
            format!("{} (default)", plan.dns_search.domain)
        };
        table.add_row(vec![Cell::new("DNS search domain"), Cell::new(search)]);

        if let Some(auth_conf) = &plan.settings.kerberos_auth {
            table.add_row(vec![
                Cell::new("Hostname override"),
                Cell::new(&auth_conf.hostname_override),
            ]);
        }

        if let Some(realms) = &plan.realm_config {
            table.add_row(vec![
                Cell::new("Default realm"),
                Cell::new(&realms.libdefaults.default_realm).fg(self.theme.info),
            ]);
            if let Some(lifetime) = &realms.libdefaults.ticket_lifetime {
                table.add_row(vec![Cell::new("Ticket lifetime"), Cell::new(lifetime)]);
            }
            let realm_lines: Vec<String> = realms
                .realms
                .iter()
                .map(|(name, entry)| format!("{}: kdc {}", name, entry.kdc))
                .collect();
            table.add_row(vec![Cell::new("Realms"), Cell::new(realm_lines.join("\n"))]);
            let mapping_lines: Vec<String> = realms
                .domain_realm
                .iter()
                .map(|(domain, realm)| format!("{} = {}", domain, realm))
                .collect();
            table.add_row(vec![
                Cell::new("Domain mappings"),
                Cell::new(mapping_lines.join("\n")).fg(self.theme.muted),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ EMR Connection {} ─╮\n",
            format!("[{}]", plan.cluster_id).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    pub fn render_artifacts(&self, artifacts: &AppliedArtifacts) -> String {
        let mut output = String::new();
        for path in [&artifacts.sparkmagic_conf, &artifacts.krb5_conf]
            .into_iter()
            .flatten()
        {
            output.push_str(&format!(
                "{} Wrote {}\n",
                StatusIcon::SUCCESS.green(),
                path.display()
            ));
        }
        output
    }

    /// Numbered list of follow-up actions
    pub fn render_next_steps(&self, steps: &[String]) -> String {
        let mut output = format!("{}\n", "Next steps:".yellow().bold());
        for (i, step) in steps.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, step.yellow()));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_next_steps_numbered() {
        colored::control::set_override(false);
        let renderer = TableRenderer::new();
        let output = renderer.render_next_steps(&[
            "Open the image terminal and run: kinit $user".to_string(),
            "Restart the kernel".to_string(),
        ]);
        assert!(output.starts_with("Next steps:"));
        assert!(output.contains("1. Open the image terminal and run: kinit $user"));
        assert!(output.contains("2. Restart the kernel"));
    }

    #[test]
    fn test_render_artifacts() {
        colored::control::set_override(false);
        let renderer = TableRenderer::new();
        let output = renderer.render_artifacts(&AppliedArtifacts {
            sparkmagic_conf: Some("/etc/sparkmagic/config.json".into()),
            krb5_conf: None,
        });
        assert!(output.contains("Wrote /etc/sparkmagic/config.json"));
        assert!(!output.contains("krb5"));
    }
}
