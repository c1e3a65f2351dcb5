//! Decorative page pieces shared by every screen: background, navbar, hero, certificate preview.
//!
//! Motion is plain CSS keyframes from [`STYLES`]; the only script is the preview's pointer tilt.

use crate::maud_conveniences::gradient_link;
use maud::{Markup, PreEscaped, Render, html};

pub const TAILWIND_THEME: &str = r"
@theme {
    --color-navy-950: #070A1C;
    --color-navy-900: #0A0E27;
    --color-navy-800: #11183A;
    --shadow-glass: 0 20px 60px rgba(0,0,0,0.35);
    --shadow-glow: 0 20px 60px rgba(99,102,241,0.25);
    --radius-2xl: 1.25rem;
    --radius-3xl: 1.75rem;
}
";

pub const STYLES: &str = r"
@keyframes fade-up { from { opacity: 0; transform: translateY(16px); } to { opacity: 1; transform: none; } }
@keyframes fade-down { from { opacity: 0; transform: translateY(-10px); } to { opacity: 1; transform: none; } }
@keyframes slide-in { from { opacity: 0; transform: translateX(18px); } to { opacity: 1; transform: none; } }
@keyframes drift { 0%, 100% { translate: 0 0; } 33% { translate: 60px -40px; } 66% { translate: -40px 50px; } }
@keyframes bob { 0%, 100% { translate: 0 0; } 50% { translate: 0 -10px; } }
.anim-fade-up { animation: fade-up 0.6s cubic-bezier(0.22, 1, 0.36, 1) both; }
.anim-fade-down { animation: fade-down 0.55s cubic-bezier(0.22, 1, 0.36, 1) both; }
.anim-slide-in { animation: slide-in 0.7s cubic-bezier(0.22, 1, 0.36, 1) both; }
.anim-drift { animation: drift 20s ease-in-out infinite; }
.anim-bob { animation: bob 6.5s ease-in-out infinite; }
.page-transition { animation: fade-up 0.45s cubic-bezier(0.22, 1, 0.36, 1) both; }
.tilt { transform: perspective(900px) rotateX(var(--rx, 0deg)) rotateY(var(--ry, 0deg)); transform-style: preserve-3d; transition: transform 0.2s ease-out; }
.when-busy { display: none; }
.htmx-request .when-busy { display: inline; }
.htmx-request .when-idle { display: none; }
@media (prefers-reduced-motion: reduce) { .anim-fade-up, .anim-fade-down, .anim-slide-in, .anim-drift, .anim-bob, .page-transition { animation: none; } }
";

// rotateX is driven by vertical pointer position, rotateY by horizontal, +-10/12 degrees at the edges
const TILT_SCRIPT: &str = r"
(() => {
    const el = document.currentScript.previousElementSibling;
    el.addEventListener('mousemove', (e) => {
        const r = el.getBoundingClientRect();
        const px = (e.clientX - r.left) / r.width - 0.5;
        const py = (e.clientY - r.top) / r.height - 0.5;
        el.style.setProperty('--rx', `${-py * 20}deg`);
        el.style.setProperty('--ry', `${px * 24}deg`);
    });
    el.addEventListener('mouseleave', () => {
        el.style.setProperty('--rx', '0deg');
        el.style.setProperty('--ry', '0deg');
    });
})();
";

fn floating_shape(class: &str, delay: &str) -> Markup {
    html! {
        div class={"absolute rounded-full anim-drift " (class)} style={"animation-delay: " (delay)} {}
    }
}

pub fn background() -> Markup {
    html! {
        div class="pointer-events-none absolute inset-0 overflow-hidden" aria-hidden="true" {
            div class="absolute inset-0 opacity-70" {
                div class="absolute -left-40 -top-40 h-[520px] w-[520px] rounded-full bg-indigo-500/25 blur-[90px]" {}
                div class="absolute -right-40 -bottom-40 h-[520px] w-[520px] rounded-full bg-violet-500/25 blur-[90px]" {}
                div class="absolute left-1/2 top-1/2 h-[420px] w-[420px] -translate-x-1/2 -translate-y-1/2 rounded-full bg-sky-400/15 blur-[90px]" {}
            }
            (floating_shape("-left-56 top-24 h-[520px] w-[520px] bg-gradient-to-br from-indigo-500/25 to-violet-500/0 blur-[95px]", "0.1s"))
            (floating_shape("-right-52 bottom-16 h-[480px] w-[480px] bg-gradient-to-br from-violet-500/25 to-indigo-500/0 blur-[95px]", "0.3s"))
            (floating_shape("left-1/3 top-[30%] h-[360px] w-[360px] bg-gradient-to-br from-sky-400/20 to-indigo-500/0 blur-[90px]", "0.5s"))
            div class="absolute inset-0 bg-[radial-gradient(circle_at_20%_10%,rgba(99,102,241,0.10),transparent_40%),radial-gradient(circle_at_80%_80%,rgba(124,58,237,0.10),transparent_38%)]" {}
        }
    }
}

/// Logo badge that swaps to a letter when the image fails to load.
pub struct Brand {
    pub src: &'static str,
    pub fallback_letter: &'static str,
    pub title: &'static str,
}

impl Render for Brand {
    fn render(&self) -> Markup {
        html! {
            div class="flex items-center gap-3" {
                div class="grid h-10 w-10 place-items-center overflow-hidden rounded-xl bg-gradient-to-br from-indigo-500 to-violet-500 shadow-glow ring-1 ring-white/10" {
                    img src=(self.src) alt=(self.title) class="h-10 w-10 bg-white object-contain p-1" loading="eager"
                        onerror="this.hidden = true; this.nextElementSibling.hidden = false;";
                    span hidden class="text-sm font-extrabold text-white" {(self.fallback_letter)}
                }
                span class="hidden text-sm font-semibold tracking-tight text-white/90 sm:inline" {(self.title)}
            }
        }
    }
}

pub fn navbar() -> Markup {
    let college = Brand {
        src: "/college-logo.jpg",
        fallback_letter: "G",
        title: "Graphic Era College",
    };
    let club = Brand {
        src: "/co-dev-logo.png",
        fallback_letter: "C",
        title: "Co-Dev Club",
    };

    html! {
        header class="fixed left-0 right-0 top-0 z-50 anim-fade-down" {
            div class="mx-auto max-w-7xl px-5 sm:px-8" {
                div class="mt-5 grid grid-cols-3 items-center rounded-3xl border border-white/10 bg-white/5 px-5 py-3 shadow-glass backdrop-blur-xl" {
                    (college)
                    div class="flex justify-center" {
                        div class="relative" {
                            div class="pointer-events-none absolute -inset-x-4 -inset-y-2 -z-10 rounded-2xl bg-gradient-to-r from-indigo-500/25 to-violet-500/25 blur-xl" {}
                            a href="/" class="bg-gradient-to-r from-indigo-200 via-white to-violet-200 bg-clip-text text-center text-sm font-extrabold tracking-tight text-transparent sm:text-base" {
                                "Certificate Portal"
                            }
                        }
                    }
                    div class="flex justify-end" { (club) }
                }
            }
        }
    }
}

pub fn page_transition(class: &str, content: Markup) -> Markup {
    html! {
        main class={"page-transition " (class)} { (content) }
    }
}

pub fn hero_section() -> Markup {
    html! {
        section class="mx-auto flex min-h-screen max-w-7xl items-center px-5 pt-28 sm:px-8 sm:pt-32" {
            div class="mx-auto max-w-3xl text-center" {
                div class="inline-flex items-center gap-2 rounded-full border border-white/10 bg-white/5 px-4 py-2 text-xs font-medium text-white/80 backdrop-blur anim-fade-up" {
                    span class="grid h-5 w-5 place-items-center rounded-full bg-gradient-to-br from-indigo-500 to-violet-500 text-[10px] font-bold" { "✓" }
                    "Official Digital Certification Platform"
                }
                h1 class="mt-8 text-4xl font-extrabold tracking-tight text-white sm:text-6xl anim-fade-up" style="animation-delay: 0.08s" {
                    "Co-Dev Club"
                    span class="block bg-gradient-to-r from-white to-indigo-200 bg-clip-text text-transparent" { "Certificate Portal" }
                }
                p class="mx-auto mt-5 max-w-2xl text-base leading-relaxed text-white/70 sm:text-lg anim-fade-up" style="animation-delay: 0.18s" {
                    "Securely Download and Verify Your Official Certificates"
                }
                div class="mx-auto mt-10 max-w-xs anim-fade-up" style="animation-delay: 0.28s" {
                    (gradient_link("/portal", "Get Certificate"))
                }
            }
        }
    }
}

pub fn certificate_preview() -> Markup {
    html! {
        div class="hidden lg:block" {
            div class="relative anim-slide-in" {
                div class="anim-bob" {
                    div class="tilt overflow-hidden rounded-3xl border border-white/10 bg-white/5 shadow-[0_35px_90px_rgba(0,0,0,0.45)] backdrop-blur-xl" {
                        div class="relative" style="transform: translateZ(26px)" {
                            img src="/certificate-template.jpg" alt="Certificate template" class="block h-auto w-full select-none" draggable="false" loading="eager";
                            div class="pointer-events-none absolute inset-x-0 bottom-0 h-24 bg-gradient-to-t from-black/35 to-transparent" {}
                        }
                    }
                    script { (PreEscaped(TILT_SCRIPT)) }
                }
                div class="absolute -inset-6 -z-10 rounded-[2rem] bg-gradient-to-r from-indigo-500/20 to-violet-500/20 blur-2xl" {}
            }
        }
    }
}
