use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardFooter, CardHeader, CardItem, CardList, CardTitle, Input, Label, Spinner,
};
use crate::editor::{word_count, MentionEditor};
use crate::models::{
    DiaryMode, Entity, JournalDraft, MoodSummary, Suggestion, UserPreferences, WellnessMetrics,
};
use crate::state::AppContext;
use crate::storage::{
    delete_draft, load_drafts, load_freshest_analysis, push_draft, save_latest_journal_analysis,
    save_latest_questionnaire_analysis, save_preferences,
};
use crate::util::{new_draft_id, now_iso, today_long_local};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// The preferences form accepts at most this many interest tags.
pub(crate) const MAX_INTERESTS: usize = 6;

/// Add a trimmed, case-insensitively deduplicated tag. Returns false when
/// the tag was empty, already present, or the list is full.
pub(crate) fn add_tag(tags: &mut Vec<String>, raw: &str, max: usize) -> bool {
    let t = raw.trim();
    if t.is_empty() || tags.len() >= max {
        return false;
    }
    let t_lower = t.to_lowercase();
    if tags.iter().any(|x| x.to_lowercase() == t_lower) {
        return false;
    }
    tags.push(t.to_string());
    true
}

/// Parse a companion entry: `Name` or `Name:relation` (relation defaults to
/// "friend" when omitted).
pub(crate) fn parse_companion(raw: &str) -> Option<Entity> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.split_once(':') {
        Some((name, relation)) => {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let relation = relation.trim();
            Some(Entity::new(
                name,
                if relation.is_empty() { "friend" } else { relation },
            ))
        }
        None => Some(Entity::new(raw, "friend")),
    }
}

/// A blank body is rejected locally before any save or draft request.
pub(crate) fn is_blank_entry(content: &str) -> bool {
    content.trim().is_empty()
}

/// Short single-line preview of a draft body for the drafts strip.
pub(crate) fn draft_preview(content: &str, max_chars: usize) -> String {
    let one_line = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.chars().count() <= max_chars {
        return one_line;
    }
    let cut: String = one_line.chars().take(max_chars).collect();
    format!("{cut}…")
}

/// Message + encouragement for a mood keyword. Unknown moods read as calm.
pub(crate) fn mood_presets(mood: &str) -> (&'static str, &'static str) {
    match mood {
        "happy" => (
            "You're radiating positivity today!",
            "Keep spreading that joy!",
        ),
        "calm" => ("You seem peaceful and centered", "Your balance is inspiring!"),
        "sad" => ("It seems like a tough day", "Tomorrow is a new beginning!"),
        "stressed" => ("You seem overwhelmed today", "Take it one step at a time!"),
        "angry" => (
            "You seem frustrated today",
            "Take a moment to breathe and reset!",
        ),
        "tired" => ("You seem exhausted today", "Rest is productive too!"),
        "neutral" => ("How are you feeling today?", "Your mood matters to us!"),
        _ => ("You seem peaceful and centered", "Your balance is inspiring!"),
    }
}

pub(crate) fn mood_emoji(mood: &str) -> &'static str {
    match mood {
        "happy" => "😊",
        "calm" => "😌",
        "sad" => "😞",
        "stressed" => "😰",
        "angry" => "😠",
        "tired" => "😴",
        "neutral" => "😐",
        _ => "😊",
    }
}

/// Clear a transient status line after `ms`. Mirrors the page behavior of
/// the classic app: a later status can be cleared by an earlier timer, which
/// is harmless for these short-lived messages.
fn clear_status_after(status: RwSignal<Option<String>>, ms: i32) {
    let cb = Closure::once_into_js(move || status.set(None));
    let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        ms,
    );
}

fn flash_status(status: RwSignal<Option<String>>, msg: &str, ms: i32) {
    status.set(Some(msg.to_string()));
    clear_status_after(status, ms);
}

/// Navigate after a short delay so the user sees the success status first.
fn navigate_after(href: &'static str, ms: i32) {
    let cb = Closure::once_into_js(move || {
        let _ = window().location().set_href(href);
    });
    let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        ms,
    );
}

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-2xl flex-col justify-center px-4 py-12">
                <div class="mb-6">
                    <span class="text-sm font-medium text-foreground">"Soulink"</span>
                    <div class="text-xs text-muted-foreground">"Your wellness companion."</div>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-2xl">"Welcome to Soulink"</CardTitle>
                        <CardDescription>
                            "Journal your thoughts, track your mood, and get gentle, personalized wellness nudges."
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <div class="flex flex-col gap-3 sm:flex-row">
                            <Button href="/preferences">"Set up preferences"</Button>
                            <Button href="/journal" variant=ButtonVariant::Outline>"Start journaling"</Button>
                            <Button href="/dashboard" variant=ButtonVariant::Ghost>"Open dashboard"</Button>
                        </div>
                    </CardContent>

                    <CardFooter>
                        <div class="text-xs text-muted-foreground">
                            "Everything you write stays between you and your journal."
                        </div>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn PreferencesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let stored = app_state.0.preferences.get_untracked();

    let username: RwSignal<String> = RwSignal::new(stored.username.clone());
    let interests: RwSignal<Vec<String>> = RwSignal::new(stored.interests.clone());
    let interest_input: RwSignal<String> = RwSignal::new(String::new());
    let companions: RwSignal<Vec<Entity>> = RwSignal::new(stored.companions.clone());
    let companion_input: RwSignal<String> = RwSignal::new(String::new());
    let diary_mode: RwSignal<DiaryMode> = RwSignal::new(stored.diary_mode);
    let status: RwSignal<Option<String>> = RwSignal::new(None);

    let add_interest = move || {
        let raw = interest_input.get_untracked();
        let mut added = false;
        interests.update(|tags| {
            added = add_tag(tags, &raw, MAX_INTERESTS);
        });
        if added {
            interest_input.set(String::new());
        } else if interests.get_untracked().len() >= MAX_INTERESTS {
            flash_status(status, &format!("Up to {MAX_INTERESTS} interests."), 3000);
        }
    };

    let add_companion = move || {
        let raw = companion_input.get_untracked();
        let Some(entity) = parse_companion(&raw) else {
            return;
        };
        let name_lower = entity.name.to_lowercase();
        let exists = companions
            .get_untracked()
            .iter()
            .any(|e| e.name.to_lowercase() == name_lower);
        if exists {
            flash_status(status, "Already on your list.", 3000);
            return;
        }
        companions.update(|list| list.push(entity));
        companion_input.set(String::new());
    };

    let on_save = move |_| {
        let prefs = UserPreferences {
            username: {
                let u = username.get_untracked().trim().to_string();
                if u.is_empty() { "User".to_string() } else { u }
            },
            interests: interests.get_untracked(),
            diary_mode: diary_mode.get_untracked(),
            companions: companions.get_untracked(),
        };

        save_preferences(&prefs);
        let next = match prefs.diary_mode {
            DiaryMode::Diary => "/journal",
            DiaryMode::Questionnaire => "/questionnaire",
        };
        app_state.0.preferences.set(prefs);

        let _ = window().location().set_href(next);
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-md flex-col justify-center px-4 py-12">
                <div class="mb-6">
                    <a href="/" class="text-sm font-medium text-foreground">"Soulink"</a>
                    <div class="text-xs text-muted-foreground">"Preferences"</div>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-xl">"Preferences"</CardTitle>
                        <CardDescription>
                            "Customize your profile by choosing the preferences that best suit you."
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <div class="flex flex-col gap-4">
                            <div class="flex flex-col gap-2">
                                <Label html_for="username">"Username"</Label>
                                <Input
                                    id="username"
                                    placeholder="Enter your username"
                                    bind_value=username
                                />
                            </div>

                            <div class="flex flex-col gap-2">
                                <Label html_for="interests">"Interests"</Label>
                                <div class="flex gap-2">
                                    <Input
                                        id="interests"
                                        placeholder="Enter an interest"
                                        bind_value=interest_input
                                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                                            // Enter or comma commits the tag.
                                            if ev.key() == "Enter" || ev.key() == "," {
                                                ev.prevent_default();
                                                add_interest();
                                            }
                                        }
                                    />
                                    <Button variant=ButtonVariant::Outline on:click=move |_| add_interest()>
                                        "Add"
                                    </Button>
                                </div>
                                <div class="flex flex-wrap gap-1.5">
                                    {move || {
                                        interests
                                            .get()
                                            .into_iter()
                                            .enumerate()
                                            .map(|(i, tag)| {
                                                view! {
                                                    <span class="inline-flex items-center gap-1 rounded-full bg-muted px-2.5 py-0.5 text-xs">
                                                        {tag}
                                                        <button
                                                            class="text-muted-foreground hover:text-foreground"
                                                            aria-label="Remove interest"
                                                            on:click=move |_| {
                                                                interests.update(|tags| {
                                                                    tags.remove(i);
                                                                });
                                                            }
                                                        >
                                                            "×"
                                                        </button>
                                                    </span>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </div>
                            </div>

                            <div class="flex flex-col gap-2">
                                <Label>"Diary type"</Label>
                                <div class="flex gap-2">
                                    {[DiaryMode::Diary, DiaryMode::Questionnaire]
                                        .into_iter()
                                        .map(|mode| {
                                            view! {
                                                <button
                                                    class=move || {
                                                        if diary_mode.get() == mode {
                                                            "h-9 rounded-md bg-primary px-4 text-sm font-medium text-primary-foreground"
                                                        } else {
                                                            "h-9 rounded-md border bg-transparent px-4 text-sm font-medium text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                                                        }
                                                    }
                                                    on:click=move |_| diary_mode.set(mode)
                                                >
                                                    {mode.to_string()}
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>

                            <div class="flex flex-col gap-2">
                                <Label html_for="companions">"Important real life characters"</Label>
                                <div class="flex gap-2">
                                    <Input
                                        id="companions"
                                        placeholder="Name or Name:relation"
                                        bind_value=companion_input
                                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                                            if ev.key() == "Enter" {
                                                ev.prevent_default();
                                                add_companion();
                                            }
                                        }
                                    />
                                    <Button variant=ButtonVariant::Outline on:click=move |_| add_companion()>
                                        "Add"
                                    </Button>
                                </div>
                                <div class="text-xs text-muted-foreground">
                                    "These people show up when you type @ in your journal."
                                </div>
                                <div class="flex flex-wrap gap-1.5">
                                    {move || {
                                        companions
                                            .get()
                                            .into_iter()
                                            .enumerate()
                                            .map(|(i, entity)| {
                                                view! {
                                                    <span class="inline-flex items-center gap-1 rounded-full bg-muted px-2.5 py-0.5 text-xs">
                                                        {entity.name}
                                                        <span class="text-muted-foreground">{format!("({})", entity.relation)}</span>
                                                        <button
                                                            class="text-muted-foreground hover:text-foreground"
                                                            aria-label="Remove person"
                                                            on:click=move |_| {
                                                                companions.update(|list| {
                                                                    list.remove(i);
                                                                });
                                                            }
                                                        >
                                                            "×"
                                                        </button>
                                                    </span>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </div>
                            </div>

                            <Show when=move || status.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    status.get().map(|s| view! {
                                        <Alert>
                                            <AlertDescription>{s}</AlertDescription>
                                        </Alert>
                                    })
                                }}
                            </Show>
                        </div>
                    </CardContent>

                    <CardFooter class="justify-end">
                        <Button on:click=on_save>"Next"</Button>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn JournalPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let entry: RwSignal<String> = RwSignal::new("Dear Diary, \n ".to_string());
    let is_loading: RwSignal<bool> = RwSignal::new(false);
    let save_status: RwSignal<Option<String>> = RwSignal::new(None);
    let drafts: RwSignal<Vec<JournalDraft>> = RwSignal::new(load_drafts());

    let words = Signal::derive(move || word_count(&entry.get()));

    let roster = Signal::derive(move || app_state.0.preferences.get().companions.clone());

    let on_save = move || {
        if is_blank_entry(&entry.get_untracked()) {
            flash_status(save_status, "Please write something before saving.", 3000);
            return;
        }

        let api_client = app_state.0.api_client.get_untracked();
        let user_id = app_state.0.user_id.get_untracked();
        let content = entry.get_untracked();

        is_loading.set(true);
        save_status.set(Some("Saving...".to_string()));

        spawn_local(async move {
            match api_client.save_journal(&content, &user_id).await {
                Ok(analysis) => {
                    save_latest_journal_analysis(&analysis);
                    flash_status(save_status, "Journal entry saved successfully!", 3000);
                    // Short delay so the success message is visible.
                    navigate_after("/dashboard", 1400);
                }
                Err(e) => {
                    flash_status(save_status, &format!("Error: {e}"), 4000);
                }
            }
            is_loading.set(false);
        });
    };

    let on_save_draft = move |_| {
        if is_blank_entry(&entry.get_untracked()) {
            flash_status(save_status, "Please write something before saving as draft.", 3000);
            return;
        }

        push_draft(&new_draft_id(), &entry.get_untracked());
        drafts.set(load_drafts());
        flash_status(save_status, "Saved as draft!", 2000);
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-2xl px-4 py-8">
                <div class="mb-4 flex items-center justify-between">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">"Daily Journal"</h1>
                        <p class="text-xs text-muted-foreground">
                            "Write down your thoughts, feelings, and reflections for today"
                        </p>
                    </div>
                    <Button href="/dashboard" variant=ButtonVariant::Ghost attr:aria-label="Back">
                        "Back"
                    </Button>
                </div>

                <Card>
                    <CardHeader class="w-full">
                        <div class="flex w-full items-center justify-between">
                            <CardDescription>{today_long_local()}</CardDescription>
                            <div class="text-xs text-muted-foreground">
                                {move || format!("{} words", words.get())}
                            </div>
                        </div>
                    </CardHeader>

                    <CardContent>
                        <MentionEditor
                            value=entry
                            roster=roster
                            placeholder="How are you feeling today? What happened? What are you grateful for?"
                            disabled=Signal::derive(move || is_loading.get())
                            on_submit=Some(Callback::new(move |_: ()| on_save()))
                        />

                        <Show when=move || save_status.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                save_status.get().map(|s| view! {
                                    <Alert class="mt-3">
                                        <AlertDescription>{s}</AlertDescription>
                                    </Alert>
                                })
                            }}
                        </Show>
                    </CardContent>

                    <CardFooter class="justify-end">
                        <Button
                            variant=ButtonVariant::Secondary
                            attr:disabled=move || is_loading.get()
                            attr:title="Save as draft"
                            on:click=on_save_draft
                        >
                            "Save as Draft"
                        </Button>
                        <Button
                            attr:disabled=move || is_loading.get()
                            attr:title="Save (Ctrl/Cmd + Enter)"
                            on:click=move |_| on_save()
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || is_loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if is_loading.get() { "Saving..." } else { "Save Entry" }}
                            </span>
                        </Button>
                    </CardFooter>
                </Card>

                <Show when=move || !drafts.get().is_empty() fallback=|| ().into_view()>
                    <Card class="mt-4">
                        <CardHeader>
                            <CardTitle class="text-sm">"Drafts"</CardTitle>
                            <CardDescription>
                                {move || format!("{} saved, newest first", drafts.get().len())}
                            </CardDescription>
                        </CardHeader>
                        <CardContent>
                            <div class="flex flex-col gap-2">
                                {move || {
                                    drafts
                                        .get()
                                        .into_iter()
                                        .map(|draft| {
                                            let id_for_delete = draft.id.clone();
                                            let content_for_load = draft.content.clone();
                                            view! {
                                                <div class="flex items-center justify-between gap-2 rounded-md border px-3 py-2">
                                                    <button
                                                        class="min-w-0 flex-1 cursor-pointer truncate text-left text-sm hover:text-foreground/80"
                                                        title="Load draft"
                                                        on:click=move |_| {
                                                            entry.set(content_for_load.clone());
                                                        }
                                                    >
                                                        {draft_preview(&draft.content, 80)}
                                                    </button>
                                                    <Button
                                                        variant=ButtonVariant::Ghost
                                                        size=ButtonSize::Sm
                                                        attr:aria-label="Delete draft"
                                                        on:click=move |_| {
                                                            delete_draft(&id_for_delete);
                                                            drafts.set(load_drafts());
                                                        }
                                                    >
                                                        "Delete"
                                                    </Button>
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </CardContent>
                    </Card>
                </Show>
            </div>
        </div>
    }
}

// Fixed mood questionnaire (15 statements, 5-point agree scale).
const QUESTIONS: [&str; 15] = [
    "I felt energetic and motivated today.",
    "I was able to focus on my tasks without distractions.",
    "I felt anxious or worried during the day.",
    "I enjoyed spending time with others.",
    "I felt lonely or isolated.",
    "I had a sense of accomplishment today.",
    "I felt stressed or overwhelmed.",
    "I was able to relax when I needed to.",
    "I felt optimistic about the future.",
    "I had negative thoughts I couldn't control.",
    "I felt grateful for something today.",
    "I had trouble controlling my emotions.",
    "I felt connected to people around me.",
    "I felt bored or uninterested in activities.",
    "Overall, I would describe my mood as positive.",
];

const OPTIONS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// Build the submission payload iff every question is answered.
pub(crate) fn collect_answers(answers: &[Option<usize>]) -> Option<Vec<String>> {
    answers
        .iter()
        .map(|a| a.map(|i| OPTIONS[i].to_string()))
        .collect()
}

#[component]
pub fn QuestionnairePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let answers: RwSignal<Vec<Option<usize>>> = RwSignal::new(vec![None; QUESTIONS.len()]);
    let is_loading: RwSignal<bool> = RwSignal::new(false);
    let save_status: RwSignal<Option<String>> = RwSignal::new(None);

    let on_save = move |_| {
        let Some(selected) = collect_answers(&answers.get_untracked()) else {
            flash_status(save_status, "Please answer all questions before saving.", 3000);
            return;
        };

        let api_client = app_state.0.api_client.get_untracked();
        let user_id = app_state.0.user_id.get_untracked();

        is_loading.set(true);
        save_status.set(Some("Saving...".to_string()));

        spawn_local(async move {
            match api_client
                .submit_questionnaire(selected, &user_id, &now_iso())
                .await
            {
                Ok(analysis) => {
                    save_latest_questionnaire_analysis(&analysis);
                    flash_status(save_status, "Responses saved successfully!", 3000);
                    navigate_after("/dashboard", 1200);
                }
                Err(e) => {
                    flash_status(save_status, &format!("Error: {e}"), 4000);
                }
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-2xl px-4 py-8">
                <div class="mb-4 space-y-1">
                    <h1 class="text-xl font-semibold">"Daily Check-in"</h1>
                    <p class="text-xs text-muted-foreground">
                        "Rate how much each statement applied to you today"
                    </p>
                </div>

                <Card>
                    <CardContent>
                        <div class="flex flex-col gap-5">
                            {QUESTIONS
                                .iter()
                                .enumerate()
                                .map(|(qi, question)| {
                                    view! {
                                        <div class="flex flex-col gap-2">
                                            <div class="text-sm font-medium">
                                                {format!("{}. {}", qi + 1, question)}
                                            </div>
                                            <div class="flex flex-wrap gap-1.5">
                                                {OPTIONS
                                                    .iter()
                                                    .enumerate()
                                                    .map(|(oi, option)| {
                                                        let selected = Signal::derive(move || {
                                                            answers.get().get(qi).copied().flatten() == Some(oi)
                                                        });
                                                        view! {
                                                            <button
                                                                class=move || {
                                                                    if selected.get() {
                                                                        "h-8 rounded-md bg-primary px-3 text-sm font-medium text-primary-foreground"
                                                                    } else {
                                                                        "h-8 rounded-md border bg-transparent px-3 text-sm text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                                                                    }
                                                                }
                                                                on:click=move |_| {
                                                                    answers.update(|a| {
                                                                        if let Some(slot) = a.get_mut(qi) {
                                                                            *slot = Some(oi);
                                                                        }
                                                                    });
                                                                }
                                                            >
                                                                {*option}
                                                            </button>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>

                        <Show when=move || save_status.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                save_status.get().map(|s| view! {
                                    <Alert class="mt-4">
                                        <AlertDescription>{s}</AlertDescription>
                                    </Alert>
                                })
                            }}
                        </Show>
                    </CardContent>

                    <CardFooter class="justify-end">
                        <Button attr:disabled=move || is_loading.get() on:click=on_save>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || is_loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if is_loading.get() { "Saving..." } else { "Save Responses" }}
                            </span>
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

const ACHIEVEMENTS: [(&str, &str, bool); 4] = [
    ("😊", "Happy Mood", true),
    ("🌱", "Growth", true),
    ("💬", "Social", true),
    ("⭐", "Achievement", false),
];

fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            text: "Start your day with journaling".to_string(),
            icon: "📝".to_string(),
        },
        Suggestion {
            text: "Take a moment to breathe deeply".to_string(),
            icon: "🧘".to_string(),
        },
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let mood: RwSignal<MoodSummary> = RwSignal::new(MoodSummary::default());
    let suggestions: RwSignal<Vec<Suggestion>> = RwSignal::new(default_suggestions());
    let wellness: RwSignal<WellnessMetrics> = RwSignal::new(WellnessMetrics::default());
    let is_loading: RwSignal<bool> = RwSignal::new(false);

    let apply_mood = move |mood_key: &str| {
        let (message, encouragement) = mood_presets(mood_key);
        mood.set(MoodSummary {
            mood: mood_key.to_string(),
            message: message.to_string(),
            encouragement: encouragement.to_string(),
        });
    };

    let fetch_suggestions = move || {
        let api_client = app_state.0.api_client.get_untracked();
        let user_id = app_state.0.user_id.get_untracked();
        spawn_local(async move {
            // Defaults are kept on any error.
            if let Ok(list) = api_client.get_suggestions(&user_id).await {
                if !list.is_empty() {
                    suggestions.set(list);
                }
            }
        });
    };

    let load_dashboard = move || {
        // Freshest locally stored analysis first (journal or questionnaire,
        // whichever was saved last), so the dashboard is useful offline.
        if let Some(stored) = load_freshest_analysis() {
            if let Some(list) = stored.analysis.ai_suggestions {
                if !list.is_empty() {
                    suggestions.set(list);
                }
            }
            if let Some(metrics) = stored.analysis.wellness_metrics {
                wellness.set(metrics);
            }
            if let Some(sentiment) = stored.analysis.sentiment_analysis {
                if !sentiment.mood.trim().is_empty() {
                    apply_mood(&sentiment.mood);
                }
            }
        }

        let api_client = app_state.0.api_client.get_untracked();
        let user_id = app_state.0.user_id.get_untracked();

        is_loading.set(true);
        spawn_local(async move {
            match api_client.get_todays_mood(&user_id).await {
                Ok(summary) => mood.set(summary),
                Err(e) => {
                    // Defaults are kept; the detail only goes to the console.
                    web_sys::console::debug_1(
                        &format!("mood fetch failed ({:?}): {e}", e.kind).into(),
                    );
                }
            }
            if let Ok(metrics) = api_client.get_wellness(&user_id).await {
                wellness.set(metrics);
            }
            is_loading.set(false);
        });

        fetch_suggestions();
    };

    Effect::new(move |_| {
        load_dashboard();
    });

    let journal_href = match app_state.0.preferences.get_untracked().diary_mode {
        DiaryMode::Diary => "/journal",
        DiaryMode::Questionnaire => "/questionnaire",
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-4 flex items-center justify-between">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">
                            {move || format!("Hello, {}!", app_state.0.preferences.get().username)}
                        </h1>
                        <p class="text-xs text-muted-foreground">"Your wellness at a glance"</p>
                    </div>

                    <div class="flex items-center gap-2">
                        <Show when=move || is_loading.get() fallback=|| ().into_view()>
                            <span class="inline-flex items-center gap-2 text-xs text-muted-foreground">
                                <Spinner />
                                "Loading your wellness data..."
                            </span>
                        </Show>
                        <Button href=journal_href>"Take a Journal"</Button>
                    </div>
                </div>

                <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
                    <Card>
                        <CardHeader>
                            <CardTitle class="text-base">"Today's Mood"</CardTitle>
                        </CardHeader>
                        <CardContent>
                            {move || {
                                let m = mood.get();
                                view! {
                                    <div class="flex items-center gap-3">
                                        <span class="text-3xl">{mood_emoji(&m.mood)}</span>
                                        <div class="space-y-1">
                                            <div class="text-sm">{m.message}</div>
                                            <div class="text-xs text-muted-foreground">{m.encouragement}</div>
                                        </div>
                                    </div>
                                }
                            }}
                        </CardContent>
                    </Card>

                    <Card>
                        <CardHeader class="w-full">
                            <div class="flex w-full items-center justify-between">
                                <CardTitle class="text-base">"AI Suggestions"</CardTitle>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    attr:aria-label="Refresh AI suggestions"
                                    on:click=move |_| fetch_suggestions()
                                >
                                    "Refresh"
                                </Button>
                            </div>
                        </CardHeader>
                        <CardContent>
                            <CardList class="gap-2">
                                {move || {
                                    suggestions
                                        .get()
                                        .into_iter()
                                        .map(|s| {
                                            view! {
                                                <CardItem class="items-start gap-2 text-sm">
                                                    <span class="shrink-0">{s.icon}</span>
                                                    <span>{s.text}</span>
                                                </CardItem>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </CardList>
                        </CardContent>
                    </Card>

                    <Card>
                        <CardHeader>
                            <CardTitle class="text-base">"Wellness"</CardTitle>
                        </CardHeader>
                        <CardContent>
                            {move || {
                                let w = wellness.get();
                                view! {
                                    <div class="grid grid-cols-3 gap-2 text-center">
                                        <div>
                                            <div class="text-2xl font-semibold">{w.wellness_score}"/5"</div>
                                            <div class="text-xs text-muted-foreground">"Score"</div>
                                        </div>
                                        <div>
                                            <div class="text-2xl font-semibold">{w.mood_trend}"%"</div>
                                            <div class="text-xs text-muted-foreground">"Mood trend"</div>
                                        </div>
                                        <div>
                                            <div class="text-2xl font-semibold">{w.total_entries}</div>
                                            <div class="text-xs text-muted-foreground">"Entries"</div>
                                        </div>
                                    </div>
                                }
                            }}
                        </CardContent>
                    </Card>

                    <Card>
                        <CardHeader>
                            <CardTitle class="text-base">"Achievements"</CardTitle>
                        </CardHeader>
                        <CardContent>
                            <div class="flex flex-wrap gap-3">
                                {ACHIEVEMENTS
                                    .iter()
                                    .map(|(icon, name, unlocked)| {
                                        let faded = if *unlocked { "" } else { "opacity-40" };
                                        view! {
                                            <div class=format!("flex flex-col items-center gap-1 {faded}")>
                                                <span class="text-2xl">{*icon}</span>
                                                <span class="text-xs text-muted-foreground">{*name}</span>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </CardContent>
                    </Card>
                </div>
            </div>
        </div>
    }
}
