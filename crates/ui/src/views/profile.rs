use std::sync::Arc;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::resources::StringKey;
use crate::views::use_watch;
use crate::vm::{ProfileCardVm, UiMessage, UiState, map_profile_card};

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let vm = use_hook(|| Arc::new(ctx.profile_view_model()));

    let state = use_watch({
        let vm = Arc::clone(&vm);
        move || vm.subscribe_state()
    });
    let message = use_watch({
        let vm = Arc::clone(&vm);
        move || vm.subscribe_message()
    });
    let logout = use_watch({
        let vm = Arc::clone(&vm);
        move || vm.subscribe_logout()
    });

    // Mount maps to on_start and unmount to on_stop. The account is loaded
    // once per mount; updates while mounted arrive through the listener.
    use_hook({
        let vm = Arc::clone(&vm);
        move || vm.on_start()
    });
    use_drop({
        let vm = Arc::clone(&vm);
        move || vm.on_stop()
    });

    use_future({
        let vm = Arc::clone(&vm);
        move || {
            let vm = Arc::clone(&vm);
            async move { vm.load_account().await }
        }
    });

    let card_state = state
        .read()
        .clone()
        .map(|account| map_profile_card(&account, clock));
    let signed_out = (*logout.read() == Some(true))
        .then(|| ctx.resources().string(StringKey::LogoutSucceeded));

    let on_logout = {
        let vm = Arc::clone(&vm);
        move |()| {
            let vm = Arc::clone(&vm);
            spawn(async move { vm.logout().await });
        }
    };
    let on_retry = {
        let vm = Arc::clone(&vm);
        move |()| {
            let vm = Arc::clone(&vm);
            spawn(async move { vm.load_account().await });
        }
    };
    let on_dismiss = {
        let vm = Arc::clone(&vm);
        move |()| {
            vm.take_message();
        }
    };

    rsx! {
        ProfileContent {
            state: card_state,
            message: message.read().clone(),
            signed_out,
            on_logout,
            on_retry,
            on_dismiss,
        }
    }
}

/// Stateless rendering of the profile screen.
#[component]
pub fn ProfileContent(
    state: UiState<ProfileCardVm>,
    message: Option<UiMessage>,
    signed_out: Option<String>,
    on_logout: EventHandler<()>,
    on_retry: EventHandler<()>,
    on_dismiss: EventHandler<()>,
) -> Element {
    let banner = message.map(|message| {
        let class = match &message {
            UiMessage::SnackBar(_) => "banner snackbar",
            UiMessage::Toast(_) => "banner toast",
        };
        let text = message.text().to_owned();
        rsx! {
            div { class: "{class}", role: "status",
                span { "{text}" }
                button { class: "btn", onclick: move |_| on_dismiss.call(()), "Dismiss" }
            }
        }
    });

    if let Some(text) = signed_out {
        return rsx! {
            div { class: "page profile",
                h2 { "Profile" }
                p { class: "signed-out", "{text}" }
            }
        };
    }

    let body = match state {
        UiState::Loading => rsx! {
            p { class: "muted", "Loading profile..." }
            if banner.is_some() {
                button { class: "btn", onclick: move |_| on_retry.call(()), "Retry" }
            }
        },
        UiState::Error => rsx! {
            p { "Something went wrong" }
            button { class: "btn", onclick: move |_| on_retry.call(()), "Retry" }
        },
        UiState::Data(card) => rsx! { ProfileCard { card } },
    };

    rsx! {
        div { class: "page profile",
            h2 { "Profile" }
            {banner}
            {body}
            button {
                class: "btn danger",
                onclick: move |_| on_logout.call(()),
                "Sign out"
            }
        }
    }
}

#[component]
fn ProfileCard(card: ProfileCardVm) -> Element {
    let edit_notice = ProfileCardVm::edit_notice();
    rsx! {
        section { class: "card profile-card",
            if let Some(url) = card.image_url.clone() {
                img { class: "avatar", src: "{url}", alt: "Profile picture" }
            }
            h3 { "{card.display_name}" }
            p { class: "muted", "@{card.username}" }
            if card.limited {
                p { class: "notice", "Limited profile" }
            } else {
                if !card.bio.is_empty() {
                    p { class: "bio", "{card.bio}" }
                }
                dl {
                    if let Some(email) = card.email.clone() {
                        dt { "Email" }
                        dd { "{email}" }
                    }
                    if !card.country.is_empty() {
                        dt { "Country" }
                        dd { "{card.country}" }
                    }
                    if !card.languages.is_empty() {
                        dt { "Languages" }
                        dd { "{card.languages}" }
                    }
                    if let Some(joined) = card.joined.clone() {
                        dt { "Joined" }
                        dd { "{joined}" }
                    }
                }
            }
            if !card.can_edit {
                p { class: "muted", "{edit_notice}" }
            }
        }
    }
}
