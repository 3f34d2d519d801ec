use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use telya_core::{IntroGate, Route};
use telya_ui::{
    AdminBar, AdminLoginPage, BrowserStorage, Contact, Footer, Header, Hero, IntroAnimation,
    IntroPage, Portfolio, QuestionnairePage, ScrollToTopButton, Services, Testimonials,
    ThankYouPage, install_router, provide_auth, provide_content,
};

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let router = install_router();
    provide_auth();
    provide_content();

    let intro = IntroGate::new(BrowserStorage::session());
    let intro_visible = RwSignal::new(intro.should_play());
    let on_intro_end = Callback::new(move |()| {
        IntroGate::new(BrowserStorage::session()).mark_shown();
        intro_visible.set(false);
    });

    let route = Memo::new(move |_| router.route());

    view! {
      <Title text=move || route.get().title() />
      <Show
        when=move || !intro_visible.get()
        fallback=move || view! { <IntroAnimation on_end=on_intro_end /> }
      >
        {move || match route.get() {
          Route::Admin => view! { <AdminLoginPage /> }.into_any(),
          Route::ThankYou => view! { <ThankYouPage /> }.into_any(),
          Route::Questionnaire => view! { <QuestionnairePage /> }.into_any(),
          Route::Intro => view! { <IntroPage /> }.into_any(),
          Route::Home => view! { <MainSite /> }.into_any(),
        }}
        <AdminBar />
      </Show>
    }
}

/// The composed one-page site.
#[component]
fn MainSite() -> impl IntoView {
    view! {
      <Header />
      <main>
        <Hero />
        <Services />
        <Portfolio />
        <Testimonials />
        <Contact />
      </main>
      <Footer />
      <ScrollToTopButton />
    }
}
