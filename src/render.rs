//! Plain-text rendering of a view's state.

use std::io::{self, Write};

use crate::aggregate::share;
use crate::models::{DashboardSummary, ProfileData};
use crate::view_state::{Phase, ViewState};

pub fn dashboard<W: Write>(out: &mut W, state: &ViewState<DashboardSummary>) -> io::Result<()> {
    writeln!(out, "User Analytics Dashboard")?;
    writeln!(out)?;

    if state.phase == Phase::Loading {
        return writeln!(out, "Loading users...");
    }

    // A failed load shows empty panels, nothing more.
    let empty;
    let summary = match &state.data {
        Some(summary) => summary,
        None => {
            empty = DashboardSummary::default();
            &empty
        }
    };

    writeln!(out, "{:<16}{:>6}", "Total Users", summary.total_users)?;
    writeln!(out, "{:<16}{:>6}", "Total Cities", summary.total_cities)?;
    writeln!(out, "{:<16}{:>6}", "Total Streets", summary.total_streets)?;
    writeln!(out, "{:<16}{:>6}", "Total Emails", summary.total_emails)?;

    writeln!(out, "\nUsers by City")?;
    for row in &summary.by_city {
        writeln!(out, "  {:<24}{:>4}", row.label, row.count)?;
    }

    writeln!(out, "\nCompany Distribution")?;
    let slices: usize = summary.by_company.iter().map(|c| c.count).sum();
    for row in &summary.by_company {
        let pct = share(row.count, slices);
        writeln!(out, "  {:<24}{:>4}  ({pct:.0}%)", row.label, row.count)?;
    }

    writeln!(out, "\nUser Growth")?;
    for point in &summary.growth {
        writeln!(out, "  {:<10}{:>4}", point.label, point.users)?;
    }

    writeln!(out, "\nUser Details")?;
    writeln!(out, "  {:<26}{:<28}{:<16}{:<22}{}", "Name", "Email", "City", "Company", "Phone")?;
    for user in &summary.users {
        writeln!(
            out,
            "  {:<26}{:<28}{:<16}{:<22}{}",
            user.name, user.email, user.address.city, user.company.name, user.phone
        )?;
    }

    Ok(())
}

pub fn profile<W: Write>(out: &mut W, state: &ViewState<ProfileData>) -> io::Result<()> {
    match state.phase {
        Phase::Idle => return Ok(()),
        Phase::Loading => return writeln!(out, "Searching..."),
        Phase::Error => {
            let message = state.error.as_deref().unwrap_or("Lookup failed");
            return writeln!(out, "{message}");
        }
        Phase::Success => {}
    }

    let Some(data) = &state.data else {
        return Ok(());
    };
    let user = &data.profile;

    writeln!(out, "{} (@{})", user.display_name(), user.login)?;
    writeln!(out, "{}", user.profile_url)?;
    if let Some(bio) = &user.bio {
        writeln!(out, "{bio}")?;
    }
    writeln!(out, "{} followers · {} following", user.followers, user.following)?;

    let details = [
        ("Avatar", Some(user.avatar_url.as_str())),
        ("Company", user.company.as_deref()),
        ("Location", user.location.as_deref()),
        ("Blog", user.blog()),
        ("Twitter", user.twitter_handle.as_deref()),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            writeln!(out, "{label:<10}{value}")?;
        }
    }

    writeln!(out, "\nRecent Repositories")?;
    if data.repos.is_empty() {
        return writeln!(out, "  No repositories found");
    }
    for repo in &data.repos {
        let language = repo.language.as_deref().unwrap_or("-");
        writeln!(
            out,
            "  {:<32}★ {:<6}⑂ {:<6}{}",
            repo.name, repo.star_count, repo.fork_count, language
        )?;
        if let Some(description) = &repo.description {
            writeln!(out, "    {description}")?;
        }
        writeln!(out, "    {}", repo.url)?;
    }

    Ok(())
}
