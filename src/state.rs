use crate::{
    components::{STYLES, TAILWIND_THEME, background, navbar},
    config::RuntimeConfiguration,
    lookup::VerifyClient,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct PortalState {
    config: RuntimeConfiguration,
    verifier: Arc<dyn VerifyClient>,
}

impl PortalState {
    pub fn new(config: RuntimeConfiguration, verifier: Arc<dyn VerifyClient>) -> Self {
        Self { config, verifier }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    pub fn verifier(&self) -> &dyn VerifyClient {
        self.verifier.as_ref()
    }

    pub fn render(&self, markup: Markup) -> Markup {
        self.render_navigating(markup, None)
    }

    /// Wraps a page in the shell. With `navigate_to`, the browser follows that URL as soon as the page loads.
    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render_navigating(&self, markup: Markup, navigate_to: Option<&str>) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    @if let Some(to) = navigate_to {
                        meta http-equiv="refresh" content={"0; url=" (to)} {}
                    }
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    style type="text/tailwindcss" { (PreEscaped(TAILWIND_THEME)) }
                    style { (PreEscaped(STYLES)) }
                    title { "Certificate Portal" }
                }
                body class="bg-slate-950 antialiased" {
                    div class="relative min-h-screen overflow-x-hidden text-white" {
                        (background())
                        div class="relative z-10" {
                            (navbar())
                            (markup)
                        }
                    }
                }
            }
        }
    }
}
