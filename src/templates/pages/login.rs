use crate::templates::{desktop_layout, flash};
use maud::{html, Markup};

pub fn login_page(error: Option<&str>, username: &str) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                p class="lead" { "Use your registry account to continue." }

                (flash(error))

                form method="post" action="/login" class="card" {
                    label for="username" { "Username" }
                    br;
                    input type="text" id="username" name="username" value=(username) autocomplete="username" required;
                    br;
                    label for="password" { "Password" }
                    br;
                    input type="password" id="password" name="password" autocomplete="current-password" required;
                    br;
                    br;
                    button type="submit" class="act-btn e-btn" { "Sign in" }
                }
            }
        },
    )
}
