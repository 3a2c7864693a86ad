//! Plain-text rendering of engine output for the CLI. The engine itself
//! renders nothing; this module is a collaborator of the core.

use std::fmt::Write;

use crate::engine::situational::Record;
use crate::engine::{ComparisonAnalysis, TeamAtsResult};

/// Render one team's result as a readable multi-section report.
pub fn render_team(result: &TeamAtsResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} — Against The Spread ===", result.team);
    let _ = writeln!(
        out,
        "Overall: {}  ({:.1}% ATS)  ROI {:+.2}%",
        record_line(&result.overall),
        result.win_percentage,
        result.roi
    );
    let _ = writeln!(
        out,
        "Avg spread {:.1}  Avg ATS margin {:+.2}",
        result.avg_spread, result.avg_margin
    );

    let _ = writeln!(out, "\nSituational:");
    let s = &result.situational;
    let _ = writeln!(out, "  Home      {}", record_line(&s.home));
    let _ = writeln!(out, "  Away      {}", record_line(&s.away));
    let _ = writeln!(out, "  Favorite  {}", record_line(&s.favorite));
    let _ = writeln!(out, "  Underdog  {}", record_line(&s.underdog));
    let _ = writeln!(out, "  Spread ≤3.5   {}", record_line(&s.spread_sizes.small));
    let _ = writeln!(out, "  Spread ≤7     {}", record_line(&s.spread_sizes.medium));
    let _ = writeln!(out, "  Spread ≤14    {}", record_line(&s.spread_sizes.large));
    let _ = writeln!(out, "  Spread >14    {}", record_line(&s.spread_sizes.huge));

    if !result.yearly.is_empty() {
        let _ = writeln!(out, "\nBy season:");
        for year in &result.yearly {
            let _ = writeln!(
                out,
                "  {}  {}  ({:.1}%)",
                year.year,
                record_line(&year.record),
                year.win_percentage
            );
        }
    }

    if !result.best_covers.is_empty() {
        let _ = writeln!(out, "\nBest covers:");
        for g in &result.best_covers {
            let _ = writeln!(
                out,
                "  {} vs {} {} (spread {:+.1}, covered by {:.1}) [{}]",
                g.year, g.opponent, g.score, g.spread, g.margin, g.source
            );
        }
    }
    if !result.worst_beats.is_empty() {
        let _ = writeln!(out, "\nWorst beats:");
        for g in &result.worst_beats {
            let _ = writeln!(
                out,
                "  {} vs {} {} (spread {:+.1}, missed by {:.1}) [{}]",
                g.year, g.opponent, g.score, g.spread, -g.margin, g.source
            );
        }
    }

    let q = &result.data_quality;
    let _ = writeln!(out, "\nData quality: {}/100", q.score);
    let _ = writeln!(
        out,
        "  {} games ({} verified lines, {} estimated, {} invalid records skipped)",
        q.total_games, q.verified_spreads, q.estimated_spreads, q.invalid_games
    );
    if !q.sources.is_empty() {
        let sources: Vec<&str> = q.sources.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  Sources: {}", sources.join(", "));
    }

    out
}

/// Render a two-team comparison: both reports plus the shared meetings.
pub fn render_comparison(comparison: &ComparisonAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&render_team(&comparison.team_a.result));
    out.push('\n');
    out.push_str(&render_team(&comparison.team_b.result));

    let _ = writeln!(
        out,
        "\nHead-to-head meetings: {}",
        comparison.head_to_head.len()
    );
    for g in &comparison.head_to_head {
        let (home, away) = (
            g.home_team.as_deref().unwrap_or("?"),
            g.away_team.as_deref().unwrap_or("?"),
        );
        let score = match (g.home_points, g.away_points) {
            (Some(h), Some(a)) => format!("{}-{}", h, a),
            _ => "score unavailable".to_string(),
        };
        let _ = writeln!(
            out,
            "  {}: {} {} {}",
            g.season.map_or_else(|| "----".into(), |y| y.to_string()),
            home,
            score,
            away
        );
    }

    out
}

fn record_line(record: &Record) -> String {
    format!(
        "{:>2}-{:<2} ({} push{})",
        record.wins,
        record.losses,
        record.pushes,
        if record.pushes == 1 { "" } else { "es" }
    )
}
