use crate::auth::avatar_initials;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
header { display: flex; align-items: center; justify-content: space-between; padding: 12px 24px; background: #010066; color: #fff; }
header a { color: #fff; text-decoration: none; margin-right: 16px; }
main.container { max-width: 1200px; margin: 24px auto; padding: 0 16px; }
main.narrow { max-width: 420px; }
.card, .summary-card { background: #fff; border: 1px solid #e2e8f0; border-radius: 8px; padding: 16px; margin-bottom: 16px; }
.stats { display: flex; gap: 12px; flex-wrap: wrap; margin-bottom: 16px; }
.stat { background: #fff; border: 1px solid #e2e8f0; border-radius: 8px; padding: 12px 16px; min-width: 120px; }
.stat b { display: block; font-size: 1.5rem; }
table { width: 100%; border-collapse: collapse; background: #fff; font-size: 0.85rem; }
th, td { padding: 8px; border-bottom: 1px solid #f1f5f9; text-align: left; }
th { background: #010066; color: #fff; }
.pill { padding: 2px 8px; border-radius: 999px; font-size: 0.75rem; text-transform: capitalize; }
.pill.reported { background: #dcfce7; color: #166534; }
.pill.in-progress { background: #dbeafe; color: #1e40af; }
.pill.pending { background: #fef9c3; color: #854d0e; }
.pill.canceled { background: #fee2e2; color: #991b1b; }
.actions { display: flex; gap: 6px; }
.act-btn { border: none; border-radius: 4px; padding: 4px 10px; cursor: pointer; color: #fff; }
.e-btn { background: #2563eb; }
.d-btn { background: #dc2626; }
.avatar-circle { width: 32px; height: 32px; border-radius: 50%; background: #fff; color: #010066; display: inline-flex; align-items: center; justify-content: center; font-weight: bold; }
.flash { padding: 8px 12px; border-radius: 6px; background: #fee2e2; color: #991b1b; margin-bottom: 12px; }
.summary-line { padding: 4px 0; }
.mobile-cards { display: none; }
@media (max-width: 720px) { .desktop-table { display: none; } .mobile-cards { display: block; } }
"#;

pub fn desktop_layout(title: &str, viewer: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Foreclosure Registry" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                header {
                    strong { "Foreclosure Registry" }
                    @if let Some(full_name) = viewer {
                        nav {
                            a href="/dashboard" { "Records" }
                            a href="/records/new" { "New Record" }
                            a href="/reports" { "Reports" }
                        }
                        div style="display: flex; gap: 12px; align-items: center;" {
                            div id="user-avatar-container" {
                                div class="avatar-circle" title=(full_name) { (avatar_initials(full_name)) }
                            }
                            form method="post" action="/logout" style="margin: 0;" {
                                button type="submit" class="act-btn d-btn" { "Logout" }
                            }
                        }
                    }
                }
                (content)
            }
        }
    }
}
