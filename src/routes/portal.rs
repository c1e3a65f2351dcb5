use crate::{
    components::{certificate_preview, page_transition},
    lookup::{CertificateForm, Endpoints, SubmitOutcome},
    maud_conveniences::{InputField, glass_card, gradient_submit_button, message_box, title},
    state::PortalState,
};
use axum::{Form, extract::State};
use maud::{Markup, PreEscaped, html};
use serde::Deserialize;

const MESSAGE_SLOT_ID: &str = "lookup-message";

// keeps the submit button in step with the fields and drops a stale message on every edit
const FORM_SYNC_SCRIPT: &str = r"
(() => {
    const form = document.currentScript.previousElementSibling;
    const button = form.querySelector('button[type=submit]');
    const message = document.getElementById('lookup-message');
    const filled = (field) => form.elements.namedItem(field).value.trim().length > 0;
    const sync = () => { button.disabled = !(filled('name') && filled('student_id')); };
    form.addEventListener('input', () => { message.replaceChildren(); sync(); });
    sync();
})();
";

const DOWNLOAD_SCRIPT: &str =
    "window.location.href = document.getElementById('certificate-download').dataset.href;";

#[derive(Deserialize, Default)]
pub struct LookupForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    student_id: String,
}

async fn run_lookup(
    state: &PortalState,
    LookupForm { name, student_id }: LookupForm,
) -> (CertificateForm, SubmitOutcome) {
    let config = state.config();
    let endpoints = Endpoints::new(config.backend_origin(), config.public_origin());

    let mut form = CertificateForm::with_fields(name, student_id);
    let outcome = form.submit(state.verifier(), endpoints).await;
    (form, outcome)
}

fn lookup_message(form: &CertificateForm, download_url: Option<&str>) -> Markup {
    html! {
        @if let Some((kind, text)) = form.phase().message() {
            (message_box(kind, text))
        }
        @if let Some(url) = download_url {
            div id="certificate-download" data-href=(url) hidden {}
            script { (PreEscaped(DOWNLOAD_SCRIPT)) }
        }
    }
}

fn portal_page(form: &CertificateForm) -> Markup {
    let lookup_form = html! {
        form method="post" action="/portal" class="space-y-4"
            hx-post="/internal/portal/lookup" hx-target={"#" (MESSAGE_SLOT_ID)} hx-swap="innerHTML"
            hx-disabled-elt="find button" hx-sync="this:drop" {
            (InputField {
                label: "Student Name",
                name: "name",
                value: form.name(),
                autocomplete: "name",
                inputmode: None,
            })
            (InputField {
                label: "Student ID",
                name: "student_id",
                value: form.student_id(),
                autocomplete: "off",
                inputmode: Some("numeric"),
            })

            div class="pt-2" {
                (gradient_submit_button("Download Certificate", "Verifying…", form.is_submitting()))
            }

            div id=(MESSAGE_SLOT_ID) aria-live="polite" {
                (lookup_message(form, None))
            }

            div class="pt-2 text-xs text-white/45 anim-fade-up" style="animation-delay: 0.15s" {
                "Tip: Name matching is case-insensitive, but spacing matters."
            }
        }
        script { (PreEscaped(FORM_SYNC_SCRIPT)) }
    };

    page_transition(
        "mx-auto max-w-7xl px-5 pt-28 sm:px-8 sm:pt-32",
        html! {
            div class="mb-6 flex items-center justify-between" {
                div {
                    (title("Find Your Certificate"))
                    p class="mt-2 text-sm text-white/60" {
                        "Enter your workshop name + ID exactly as submitted."
                    }
                }
                a href="/" class="hidden rounded-2xl border border-white/10 bg-white/5 px-4 py-2 text-sm font-medium text-white/70 backdrop-blur transition hover:text-white md:inline" {
                    "Back"
                }
            }

            div class="grid grid-cols-1 gap-6 lg:grid-cols-2 lg:gap-10" {
                (glass_card("p-6 sm:p-8", true, lookup_form))
                (certificate_preview())
            }
        },
    )
}

pub async fn get_portal(State(state): State<PortalState>) -> Markup {
    state.render(portal_page(&CertificateForm::new()))
}

/// Whole-page submission for browsers without htmx. A found certificate is fetched through a meta refresh.
pub async fn post_portal(
    State(state): State<PortalState>,
    Form(lookup): Form<LookupForm>,
) -> Markup {
    let (form, outcome) = run_lookup(&state, lookup).await;
    state.render_navigating(portal_page(&form), outcome.download_url())
}

pub async fn internal_post_lookup(
    State(state): State<PortalState>,
    Form(lookup): Form<LookupForm>,
) -> Markup {
    let (form, outcome) = run_lookup(&state, lookup).await;
    lookup_message(&form, outcome.download_url())
}

#[cfg(test)]
pub mod tests {
    use crate::{
        backend::BackendOrigin,
        config::{RuntimeConfiguration, ServerConfig},
        lookup::{LookupError, tests::StubVerifier},
        router,
        state::PortalState,
        test_support::serve,
    };
    use std::{net::SocketAddr, path::PathBuf, sync::Arc};

    pub const PUBLIC_ORIGIN: &str = "http://portal.test";

    pub async fn spawn_portal(stub: StubVerifier, origin: &str) -> (SocketAddr, Arc<StubVerifier>) {
        let stub = Arc::new(stub);
        let config = RuntimeConfiguration::from_parts(
            ServerConfig {
                address: ([127, 0, 0, 1], 0).into(),
                assets_dir: PathBuf::from("does-not-exist"),
            },
            BackendOrigin::resolve(Some(origin)),
            Some(PUBLIC_ORIGIN.into()),
        )
        .unwrap();
        let state = PortalState::new(config, stub.clone());
        (serve(router(state)).await, stub)
    }

    async fn post(addr: SocketAddr, path: &str, name: &str, student_id: &str) -> String {
        reqwest::Client::new()
            .post(format!("http://{addr}{path}"))
            .form(&[("name", name), ("student_id", student_id)])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn portal_renders_empty_form() {
        let (addr, _) = spawn_portal(StubVerifier::found("Alice"), "").await;

        let body = reqwest::get(format!("http://{addr}/portal"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(body.contains("Find Your Certificate"));
        assert!(body.contains(r#"hx-post="/internal/portal/lookup""#));
        assert!(body.contains("Student Name") && body.contains("Student ID"));
        assert!(body.contains("Download Certificate"));
        assert!(!body.contains(r#"type="submit" disabled"#));
        assert!(body.contains("button.disabled ="));
        assert!(!body.contains("http-equiv"));
    }

    #[tokio::test]
    async fn found_student_triggers_download() {
        let (addr, stub) = spawn_portal(StubVerifier::found("Alice Smith"), "").await;

        let body = post(addr, "/internal/portal/lookup", "Alice Smith", "123").await;

        assert!(body.contains("Certificate found for Alice Smith. Download starting..."));
        assert!(body.contains(r#"data-href="/certificate?name=Alice%20Smith&amp;student_id=123""#));
        assert_eq!(
            stub.calls(),
            vec![format!("{PUBLIC_ORIGIN}/verify?name=Alice%20Smith&student_id=123")]
        );
    }

    #[tokio::test]
    async fn configured_origin_qualifies_both_calls() {
        let (addr, stub) =
            spawn_portal(StubVerifier::found("Alice Smith"), "https://api.example.com").await;

        let body = post(addr, "/internal/portal/lookup", "Alice Smith", "123").await;

        assert!(body.contains(
            r#"data-href="https://api.example.com/certificate?name=Alice%20Smith&amp;student_id=123""#
        ));
        assert_eq!(
            stub.calls(),
            vec!["https://api.example.com/verify?name=Alice%20Smith&student_id=123"]
        );
    }

    #[tokio::test]
    async fn missing_student_shows_error_without_download() {
        let (addr, _) = spawn_portal(
            StubVerifier::answering(Err(LookupError::NotFound { status: 404 })),
            "",
        )
        .await;

        let body = post(addr, "/internal/portal/lookup", "Alice Smith", "123").await;

        assert!(body.contains("Student not found. Please check your name and student ID."));
        assert!(!body.contains("certificate-download"));
    }

    #[tokio::test]
    async fn blank_name_never_calls_backend() {
        let (addr, stub) = spawn_portal(StubVerifier::found("Alice"), "").await;

        let body = post(addr, "/internal/portal/lookup", "", "123").await;

        assert!(body.contains("Please enter both name and student ID."));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_message_is_shown() {
        let (addr, _) = spawn_portal(
            StubVerifier::answering(Err(LookupError::Transport {
                message: "Failed to fetch".into(),
            })),
            "",
        )
        .await;

        let body = post(addr, "/internal/portal/lookup", "Alice Smith", "123").await;

        assert!(body.contains("Failed to fetch"));
    }

    #[tokio::test]
    async fn full_page_post_keeps_fields_and_refreshes_to_download() {
        let (addr, _) = spawn_portal(StubVerifier::found("Alice Smith"), "").await;

        let body = post(addr, "/portal", "Alice Smith", "123").await;

        assert!(body.contains(
            r#"content="0; url=/certificate?name=Alice%20Smith&amp;student_id=123""#
        ));
        assert!(body.contains(r#"value="Alice Smith""#));
        assert!(!body.contains(r#"type="submit" disabled"#));
        assert!(body.contains("Certificate found for Alice Smith. Download starting..."));
    }

    #[tokio::test]
    async fn full_page_post_failure_has_no_refresh() {
        let (addr, _) = spawn_portal(
            StubVerifier::answering(Err(LookupError::NotFound { status: 404 })),
            "",
        )
        .await;

        let body = post(addr, "/portal", "Alice Smith", "123").await;

        assert!(!body.contains("http-equiv"));
        assert!(body.contains("Student not found."));
    }

    #[tokio::test]
    async fn forwarded_host_never_steers_the_verify_call() {
        let (addr, stub) = spawn_portal(StubVerifier::found("Alice"), "").await;

        reqwest::Client::new()
            .post(format!("http://{addr}/internal/portal/lookup"))
            .header("host", "evil.example")
            .header("x-forwarded-host", "169.254.169.254")
            .header("x-forwarded-proto", "http")
            .form(&[("name", "a"), ("student_id", "1")])
            .send()
            .await
            .unwrap();

        let calls = stub.calls();
        assert_eq!(calls, vec![format!("{PUBLIC_ORIGIN}/verify?name=a&student_id=1")]);
        assert!(calls.iter().all(|url| !url.contains("169.254") && !url.contains("evil")));
    }
}
