use crate::lookup::MessageKind;
use maud::{Markup, Render, html};

const GRADIENT_CLASSES: &str = "group relative inline-flex w-full items-center justify-center gap-2 rounded-2xl bg-gradient-to-r from-indigo-500 to-violet-500 px-6 py-3.5 text-sm font-semibold text-white shadow-glow outline-none ring-1 ring-white/10 transition duration-300 ease-out hover:scale-[1.02] active:scale-[0.99] hover:shadow-[0_18px_70px_rgba(99,102,241,0.35)] disabled:cursor-not-allowed disabled:opacity-60 disabled:hover:scale-100";

fn gradient_glow() -> Markup {
    html! {
        span class="absolute inset-0 -z-10 rounded-2xl bg-gradient-to-r from-indigo-500/50 to-violet-500/50 blur-xl opacity-70 transition group-hover:opacity-100" {}
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h2 class="text-3xl font-extrabold tracking-tight text-white sm:text-4xl" {(s)}
    }
}

pub fn glass_card(class: &str, hover: bool, content: Markup) -> Markup {
    let hover_class = if hover {
        " transition duration-300 ease-out hover:-translate-y-0.5"
    } else {
        ""
    };

    html! {
        div class={"rounded-3xl border border-white/12 bg-white/6 shadow-glass backdrop-blur-xl " (class) (hover_class)} {
            (content)
        }
    }
}

/// Submit button whose label switches to `busy_label` while its form has a request in flight.
pub fn gradient_submit_button(label: &str, busy_label: &str, disabled: bool) -> Markup {
    html! {
        button type="submit" disabled[disabled] class=(GRADIENT_CLASSES) {
            (gradient_glow())
            span class="when-idle" {(label)}
            span class="when-busy" {(busy_label)}
        }
    }
}

pub fn gradient_link(href: &str, label: &str) -> Markup {
    html! {
        a href=(href) class=(GRADIENT_CLASSES) {
            (gradient_glow())
            (label)
        }
    }
}

pub struct InputField<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub value: &'a str,
    pub autocomplete: &'a str,
    pub inputmode: Option<&'a str>,
}

impl Render for InputField<'_> {
    fn render(&self) -> Markup {
        let id = format!("{}-field", self.name);

        // the label floats up on focus or whenever the input isn't showing its blank placeholder
        html! {
            div class="relative" {
                div class="rounded-2xl transition-shadow duration-300 ease-out focus-within:shadow-[0_0_0_4px_rgba(99,102,241,0.16)]" {
                    input id=(id) name=(self.name) value=(self.value) type="text"
                        autocomplete=(self.autocomplete) inputmode=[self.inputmode] placeholder=" "
                        class="peer w-full rounded-2xl border border-white/12 bg-white/5 px-4 pb-3 pt-5 text-sm text-white/90 outline-none transition placeholder:text-transparent focus:border-indigo-400/40";
                    label for=(id) class="pointer-events-none absolute left-4 top-4 origin-left text-sm text-white/60 transition-all duration-200 ease-out peer-focus:-translate-y-2 peer-focus:scale-90 peer-focus:text-white/70 peer-[:not(:placeholder-shown)]:-translate-y-2 peer-[:not(:placeholder-shown)]:scale-90 peer-[:not(:placeholder-shown)]:text-white/70" {
                        (self.label)
                    }
                }
            }
        }
    }
}

pub fn message_box(kind: MessageKind, text: &str) -> Markup {
    let styles = match kind {
        MessageKind::Success => "border-emerald-400/30 bg-emerald-500/10 text-emerald-200",
        MessageKind::Error => "border-rose-400/30 bg-rose-500/10 text-rose-200",
    };
    let role = match kind {
        MessageKind::Success => "status",
        MessageKind::Error => "alert",
    };

    html! {
        div role=(role) class={"mt-5 rounded-2xl border px-4 py-3 text-sm anim-fade-down " (styles)} {
            (text)
        }
    }
}
