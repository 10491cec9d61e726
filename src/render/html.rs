//! HTML markup renderer
//!
//! String-based rendering of the dashboard view-models, for hosts that
//! insert markup directly. Every value that came from a report is escaped.

use super::list::{ListView, Media, ReportRow};
use super::metrics::Metrics;

/// Escape text for use in element content or a quoted attribute
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_media(media: &Media) -> String {
    match media {
        Media::Photo { url, alt, .. } => format!(
            r#"<img src="{}" alt="{}" class="w-full h-full object-cover" loading="lazy">"#,
            escape(url),
            escape(alt)
        ),
        Media::Glyph(glyph) => format!(r#"<span class="text-2xl">{}</span>"#, glyph),
    }
}

/// Render one report row
pub fn render_row(row: &ReportRow) -> String {
    let id = escape(row.id.as_str());

    format!(
        r#"<div class="report-item flex items-start gap-4 p-4 rounded-xl border border-slate-100" data-report-id="{id}">
  <div class="w-16 h-16 rounded-xl bg-slate-100 flex-shrink-0 overflow-hidden flex items-center justify-center">{media}</div>
  <div class="flex-1 min-w-0">
    <div class="flex items-start justify-between gap-2 mb-1">
      <h4 class="font-semibold text-slate-800 truncate">{title}</h4>
      <span class="status-badge {badge_class} flex-shrink-0">{badge}</span>
    </div>
    <p class="text-sm text-slate-500 line-clamp-2 mb-2">{excerpt}</p>
    <div class="flex items-center gap-3 text-xs text-slate-400">
      <span>{location}</span>
      <span>•</span>
      <span>{time_ago}</span>
    </div>
  </div>
  <div class="flex flex-col gap-2">
    <button data-action="status" data-target="{target}" data-report-id="{id}" title="{action_title}">{action}</button>
    <button data-action="delete" data-report-id="{id}" data-confirm="{armed}" title="Delete">{delete}</button>
  </div>
</div>"#,
        id = id,
        media = render_media(&row.media),
        title = escape(&row.title),
        badge_class = row.badge.class,
        badge = row.badge.label,
        excerpt = escape(&row.excerpt),
        location = escape(&row.location),
        time_ago = escape(&row.time_ago),
        target = row.action.target(),
        action_title = row.action.title(),
        action = row.action.label(),
        armed = row.delete.armed,
        delete = row.delete.label,
    )
}

/// Render the whole list, or an empty string for an empty snapshot
pub fn render_list(list: &ListView) -> String {
    list.rows.iter().map(render_row).collect::<Vec<_>>().join("\n")
}

/// Render the three metric values and the count badge
pub fn render_metrics(metrics: &Metrics) -> String {
    format!(
        r#"<span id="metric-total">{}</span><span id="metric-active">{}</span><span id="metric-resolved">{}</span><span id="report-count-badge">{}</span>"#,
        metrics.total,
        metrics.active,
        metrics.resolved,
        metrics.count_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::ConfirmState;
    use crate::report::{IssueType, Report, ReportId, Status};

    fn hostile_report() -> Report {
        Report {
            id: ReportId::new("1\"><b>"),
            issue_type: IssueType::Other("<img src=x onerror=alert(1)>".to_string()),
            description: "<script>alert(1)</script>".to_string(),
            location: "O'Brien & Sons".to_string(),
            status: Status::Active,
            image_url: Some("/uploads/a.jpg\" onerror=\"alert(1)".to_string()),
            time_ago: "Just now".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_script_description_rendered_as_text() {
        let row = ReportRow::build(&hostile_report(), ConfirmState::Idle, 140);
        let html = render_row(&row);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("O&#39;Brien &amp; Sons"));
        assert!(!html.contains("\" onerror=\""));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_render_list_and_metrics() {
        let row = ReportRow::build(&hostile_report(), ConfirmState::Idle, 140);
        let list = ListView { rows: vec![row.clone(), row] };
        assert_eq!(render_list(&list).matches("report-item").count(), 2);
        assert_eq!(render_list(&ListView::default()), "");

        let html = render_metrics(&Metrics { total: 5, active: 3, resolved: 2 });
        assert!(html.contains(r#"<span id="metric-active">3</span>"#));
        assert!(html.contains("5 reports"));
    }
}
