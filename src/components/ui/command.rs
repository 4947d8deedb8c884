use icons::Check;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::*;

mod components {
    use super::*;
    clx! {CommandList, div, "overflow-y-auto overflow-x-hidden max-h-[300px] scroll-py-1 no__scrollbar scroll-pt-2 scroll-pb-1.5"}
}

#[allow(unused_imports)]
pub use components::*;

#[derive(Clone, Copy)]
struct CommandContext {
    search_query_signal: RwSignal<String>,
    should_filter: bool,
}

#[component]
pub fn Command(
    children: Children,
    #[prop(into, optional)] class: String,
    /// When false, disables client-side filtering (the caller filters).
    /// Default: true (client-side filtering enabled).
    #[prop(default = true)]
    should_filter: bool,
    /// When true, do not inject the built-in JS keyboard handler.
    ///
    /// Rust/UI Command ships with a document-level keydown handler. The
    /// mention menu already routes key events through the editor, so this
    /// must be disabled there to avoid double-handling.
    #[prop(default = false)]
    disable_scripts: bool,
) -> impl IntoView {
    let search_query_signal = RwSignal::new(String::new());
    provide_context(CommandContext {
        search_query_signal,
        should_filter,
    });

    let merged_class = tw_merge!(
        "flex overflow-hidden flex-col w-full h-full bg-transparent rounded-none text-popover-foreground",
        class
    );

    let script_content = if disable_scripts {
        String::new()
    } else {
        // Standalone keyboard navigation over the visible rows.
        r#"
        (function() {
            const setupCommand = () => {
                const FIRST_INDEX = 0;
                const command_list = document.querySelector('[data-name="CommandList"]');
                const command_items = command_list?.querySelectorAll('[data-name="CommandItem"]');

                if (!command_items || command_items.length === 0) {
                    setTimeout(setupCommand, 50);
                    return;
                }

                let index = FIRST_INDEX;

                const getVisibleItems = () => {
                    return Array.from(command_items).filter(item => item.style.display !== 'none');
                };

                const select = (i) => {
                    const visibleItems = getVisibleItems();
                    if (visibleItems.length === 0) return;

                    command_items.forEach(item => item.setAttribute('aria-selected', 'false'));
                    if (visibleItems[i]) {
                        visibleItems[i].setAttribute('aria-selected', 'true');
                        visibleItems[i].scrollIntoView({ block: 'nearest', behavior: 'smooth' });
                    }
                };

                select(FIRST_INDEX);

                document.addEventListener('keydown', (e) => {
                    const visibleItems = getVisibleItems();
                    if (visibleItems.length === 0) return;

                    if (e.key === 'ArrowDown') {
                        e.preventDefault();
                        if (index < visibleItems.length - 1) select(++index);
                    } else if (e.key === 'ArrowUp') {
                        e.preventDefault();
                        if (index > FIRST_INDEX) select(--index);
                        else command_list.scrollTo({ top: 0, behavior: 'smooth' });
                    } else if (e.key === 'Enter') {
                        e.preventDefault();
                        visibleItems[index]?.click();
                    }
                });
            };

            if (document.readyState === 'loading') {
                document.addEventListener('DOMContentLoaded', setupCommand);
            } else {
                setupCommand();
            }
        })();
        "#
        .to_string()
    };

    let script_content_sv = StoredValue::new(script_content);

    view! {
        <style>
            r#"
            /* Command component - aria-selected styling */
            [data-name="CommandItem"][aria-selected="true"] {
                background-color: var(--color-muted);
                color: var(--color-foreground);
            }
            "#
        </style>

        <div data-name="Command" class=merged_class tabindex="-1">
            {children()}
        </div>

        <Show when=move || !script_content_sv.get_value().is_empty() fallback=|| ().into_view()>
            <script>{script_content_sv.get_value()}</script>
        </Show>
    }
}

#[component]
pub fn CommandItem(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] value: String,
    #[prop(optional)] on_select: Option<Callback<()>>,
    on_mousedown: Option<Callback<web_sys::MouseEvent>>,
    #[prop(default = false.into(), into)] selected: Signal<bool>,
) -> impl IntoView {
    let command_context = expect_context::<CommandContext>();
    let value_for_filter = value.clone();

    let merged_class = tw_merge!(
        "group relative flex gap-2 items-center px-2 py-1.5 text-sm rounded-sm cursor-default select-none outline-none data-[disabled=true]:pointer-events-none data-[disabled=true]:opacity-50 hover:bg-accent hover:text-accent-foreground",
        class
    );

    let is_visible = Memo::new(move |_| {
        // Skip client-side filtering when the caller filters for us.
        if !command_context.should_filter {
            return true;
        }

        let search = command_context.search_query_signal.get().to_lowercase();
        if search.is_empty() {
            return true;
        }
        value_for_filter.to_lowercase().contains(&search)
    });

    view! {
        <div
            data-name="CommandItem"
            class=merged_class
            role="option"
            tabindex="0"
            aria-selected=move || selected.get().to_string()
            style:display=move || if is_visible.get() { "flex" } else { "none" }
            on:mousedown=move |ev| {
                if let Some(cb) = on_mousedown {
                    cb.run(ev);
                }
            }
            on:click=move |_| {
                if let Some(callback) = on_select {
                    callback.run(());
                }
            }
        >
            {children()}
            <Check class="ml-auto size-4 text-muted-foreground hidden group-aria-selected:block" />
        </div>
    }
}
