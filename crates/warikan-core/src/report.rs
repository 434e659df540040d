//! Allocation reports with JSON persistence and Markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AllocationRequest, AllocationResult};
use crate::weight::weight;

/// A finished allocation together with the request that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Optional label, e.g. the event name.
    #[serde(default)]
    pub name: Option<String>,
    pub request: AllocationRequest,
    pub result: AllocationResult,
}

/// One row of the rendered schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleLine {
    pub name: String,
    pub headcount: u32,
    /// Weight under the winning tilt.
    pub weight: f64,
    /// Rounded per-person payment.
    pub per_person: i64,
    /// Adjusted payment of the payer, on the payer's row only.
    pub payer_payment: Option<i64>,
    /// What the whole role pays, with the payer's adjustment applied.
    pub line_total: i64,
}

impl AllocationReport {
    pub fn new(name: Option<String>, request: AllocationRequest, result: AllocationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            name,
            request,
            result,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AllocationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// The schedule row by row. Empty for infeasible results.
    ///
    /// The payer counts as one member of its role: the row total is the
    /// other members' rounded payments plus the payer's adjusted payment.
    /// A payer role always has at least one member (see
    /// [`AllocationRequest::validate`]), so the row totals add up to the
    /// settled total.
    pub fn role_lines(&self) -> Vec<RoleLine> {
        let (Some(tilt), Some(payments)) = (self.result.best_tilt, &self.result.per_role_payment)
        else {
            return Vec::new();
        };
        let payer_index = self.request.payer_index();
        let n = self.request.roles.len();

        self.request
            .roles
            .iter()
            .zip(payments)
            .enumerate()
            .map(|(i, (role, &per_person))| {
                let payer_payment = if payer_index == Some(i) {
                    self.result.payer_payment
                } else {
                    None
                };
                let line_total = match payer_payment {
                    Some(adjusted) => {
                        per_person * i64::from(role.headcount.saturating_sub(1)) + adjusted
                    }
                    None => per_person * i64::from(role.headcount),
                };
                RoleLine {
                    name: role.name.clone(),
                    headcount: role.headcount,
                    weight: weight(n, i, tilt),
                    per_person,
                    payer_payment,
                    line_total,
                }
            })
            .collect()
    }

    /// Render the report as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let title = self.name.as_deref().unwrap_or("Allocation");
        md.push_str(&format!("# {title}\n\n"));
        md.push_str(&format!("Total amount: {}\n\n", self.request.total_amount));

        let Some(tilt) = self.result.best_tilt else {
            md.push_str("**No feasible allocation.**\n");
            return md;
        };

        md.push_str("| Role | People | Weight | Per person | Subtotal |\n");
        md.push_str("|------|-------:|-------:|-----------:|---------:|\n");
        for line in self.role_lines() {
            let per_person = match line.payer_payment {
                Some(adjusted) => format!("{} (payer: {adjusted})", line.per_person),
                None => line.per_person.to_string(),
            };
            md.push_str(&format!(
                "| {} | {} | {:.2} | {} | {} |\n",
                line.name, line.headcount, line.weight, per_person, line.line_total
            ));
        }

        md.push_str(&format!("\n- Best tilt: {tilt}%\n"));
        if let Some(raw) = self.result.raw_deviation {
            md.push_str(&format!("- Deviation before settlement: {raw:+}\n"));
        }
        if let Some(total) = self.result.final_settled_total {
            md.push_str(&format!("- Settled total: {total}\n"));
        }
        if let (Some(payer), Some(payment)) = (&self.result.payer, self.result.payer_payment) {
            md.push_str(&format!("- Payer ({payer}) pays: {payment}\n"));
        }

        md
    }
}
