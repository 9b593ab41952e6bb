use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::system::auth::context::{select_root_view, use_auth, RootView};
use crate::system::pages::landing::LandingPage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::signup::SignupPage;

#[component]
fn Loading() -> impl IntoView {
    view! { <div class="page-loading">"Loading..."</div> }
}

/// `/`: landing page, login page or a placeholder while the session is checked
#[component]
fn RootPage() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let root_view = Memo::new(move |_| select_root_view(auth_state.get().status));

    move || match root_view.get() {
        RootView::Loading => view! { <Loading /> }.into_any(),
        RootView::Landing => view! { <LandingPage /> }.into_any(),
        RootView::Login => view! { <LoginPage /> }.into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="page-loading">"Page not found."</div> }>
                <Route path=path!("/") view=RootPage />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/signup") view=SignupPage />
            </Routes>
        </Router>
    }
}
