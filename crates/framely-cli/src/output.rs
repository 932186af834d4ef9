//! Console rendering: JSON, the campaign dashboard table and error reports.

use anyhow::Context;
use framely_core::{
    ApiError, Campaign, CompositionError, ConfigError, ErrorMetadata, Frame, ValidationError,
};
use serde::Serialize;

use crate::truncate_string;

const NAME_WIDTH: usize = 28;

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Dashboard row with the public link resolved.
#[derive(Debug, Serialize)]
pub struct CampaignRow<'a> {
    #[serde(flatten)]
    pub campaign: &'a Campaign,
    pub share_url: String,
}

pub fn campaign_rows<'a>(campaigns: &'a [Campaign], user_site_url: &str) -> Vec<CampaignRow<'a>> {
    campaigns
        .iter()
        .map(|campaign| CampaignRow {
            campaign,
            share_url: campaign.share_url(user_site_url),
        })
        .collect()
}

pub fn campaign_table(campaigns: &[Campaign], user_site_url: &str) -> String {
    if campaigns.is_empty() {
        return "No campaigns yet. Create one with `framely create`.".to_string();
    }

    let mut out = format!(
        "{:<6} {:<width$} {:<10} {:>6}  {}\n",
        "ID",
        "NAME",
        "CODE",
        "FRAMES",
        "SHARE URL",
        width = NAME_WIDTH
    );
    for row in campaign_rows(campaigns, user_site_url) {
        let campaign = row.campaign;
        out.push_str(&format!(
            "{:<6} {:<width$} {:<10} {:>6}  {}\n",
            campaign.id,
            truncate_string(&campaign.name, NAME_WIDTH),
            campaign.code.as_deref().unwrap_or("-"),
            campaign
                .frame_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            row.share_url,
            width = NAME_WIDTH
        ));
    }
    out.trim_end().to_string()
}

pub fn campaign_details(campaign: &Campaign, frames: &[Frame], user_site_url: &str) -> String {
    let mut out = format!(
        "Campaign {}: {}\nCode:  {}\nShare: {}\n",
        campaign.id,
        campaign.name,
        campaign.code.as_deref().unwrap_or("-"),
        campaign.share_url(user_site_url)
    );

    if frames.is_empty() {
        out.push_str("No frames");
    } else {
        out.push_str(&format!("Frames ({}):", frames.len()));
        for frame in frames {
            out.push_str(&format!(
                "\n  {:<6} {}{}",
                frame.id,
                frame.name,
                if frame.is_default == Some(true) {
                    " (default)"
                } else {
                    ""
                }
            ));
            if let Some(url) = &frame.frame_url {
                out.push_str(&format!("  {}", url));
            }
        }
    }
    out
}

fn describe(err: &dyn ErrorMetadata) -> String {
    match err.suggested_action() {
        Some(action) => format!("{} ({})", err.client_message(), action),
        None => err.client_message(),
    }
}

/// Single human-readable line for a command failure.
pub fn error_report(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<CompositionError>() {
        return describe(e);
    }
    if let Some(e) = err.downcast_ref::<ApiError>() {
        return describe(e);
    }
    if let Some(e) = err.downcast_ref::<ValidationError>() {
        return describe(e);
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return format!("Invalid configuration: {}", e);
    }
    format!("{:#}", err)
}
