//! Main page sections: hero, services, portfolio and testimonials.

use leptos::prelude::*;

use crate::{editable::EditableText, portfolio::PortfolioModal};

const HERO_VIDEO: &str =
    "https://videos.pexels.com/video-files/3209828/3209828-hd_1920_1080_25fps.mp4";

/// A service card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES: [Service; 4] = [
    Service {
        icon: "🔍",
        title: "SEO & Référencement",
        description: "Augmentez votre visibilité sur les moteurs de recherche et attirez des \
                      voyageurs qualifiés prêts à réserver.",
    },
    Service {
        icon: "💬",
        title: "Gestion des Réseaux Sociaux",
        description: "Créez une communauté engagée autour de votre marque avec des stratégies \
                      de contenu captivantes sur les plateformes sociales.",
    },
    Service {
        icon: "🎬",
        title: "Création de Contenu Immersif",
        description: "Vidéos, photos, articles de blog... Nous produisons du contenu qui fait \
                      rêver et inspire le voyage.",
    },
    Service {
        icon: "📈",
        title: "Campagnes Publicitaires",
        description: "Ciblez précisément vos futurs clients avec des campagnes PPC \
                      (Pay-Per-Click) optimisées pour un retour sur investissement maximal.",
    },
];

/// A portfolio project tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub image: &'static str,
    pub category: &'static str,
    pub title: &'static str,
}

pub const PROJECTS: [Project; 4] = [
    Project {
        image: "https://picsum.photos/800/600?random=2",
        category: "Hôtel de Luxe",
        title: "Paradise Resort",
    },
    Project {
        image: "https://picsum.photos/800/600?random=3",
        category: "Aventure",
        title: "Alpine Adventures",
    },
    Project {
        image: "https://picsum.photos/800/600?random=4",
        category: "Tourisme Urbain",
        title: "City Explorer Tours",
    },
    Project {
        image: "https://picsum.photos/800/600?random=5",
        category: "Bien-être",
        title: "Serenity Spa & Retreat",
    },
];

/// A client testimonial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
    pub avatar: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 2] = [
    Testimonial {
        quote: "Telya Agency a transformé notre présence en ligne. Nos réservations ont augmenté \
                de 40% en seulement six mois. Une équipe incroyable et dévouée !",
        author: "Sophie Dubois",
        role: "Directrice, Hôtel Le Grand Panorama",
        avatar: "https://picsum.photos/200/200?random=6",
    },
    Testimonial {
        quote: "Leur expertise dans le secteur du tourisme est inégalée. Ils comprennent nos \
                défis et livrent des résultats concrets. Je les recommande vivement.",
        author: "Marc Lefebvre",
        role: "Fondateur, Aventures Nomades",
        avatar: "https://picsum.photos/200/200?random=7",
    },
];

/// Section heading with subtitle.
#[component]
fn SectionTitle(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
      <div class="section-title">
        <h2>{title}</h2>
        <p>{subtitle}</p>
      </div>
    }
}

/// Full-height video hero with editable text.
#[component]
pub fn Hero() -> impl IntoView {
    view! {
      <section id="home" class="hero">
        <div class="hero-overlay"></div>
        <video
          src=HERO_VIDEO
          autoplay=true
          loop=true
          muted=true
          prop:muted=true
          playsinline=true
          class="hero-video"
        >
          "Votre navigateur ne supporte pas la balise vidéo."
        </video>
        <div class="hero-content">
          <h1 class="hero-title">
            <EditableText path="hero.title" />
          </h1>
          <p class="hero-subtitle">
            <EditableText path="hero.subtitle" />
          </p>
          <a href="#services" class="btn btn-primary btn-large">
            <EditableText path="hero.cta" />
          </a>
        </div>
      </section>
    }
}

#[component]
pub fn Services() -> impl IntoView {
    view! {
      <section id="services" class="section section-muted">
        <div class="container">
          <SectionTitle
            title="Nos Services"
            subtitle="Des stratégies sur mesure pour transformer votre présence en ligne et booster vos réservations."
          />
          <div class="grid grid-4">
            {SERVICES
              .iter()
              .enumerate()
              .map(|(index, service)| {
                view! {
                  <div class="card service-card" style=format!("animation-delay: {}ms", index * 100)>
                    <div class="service-icon" aria-hidden="true">
                      {service.icon}
                    </div>
                    <h3>{service.title}</h3>
                    <p>{service.description}</p>
                  </div>
                }
              })
              .collect_view()}
          </div>
        </div>
      </section>
    }
}

/// Project gallery; the call to action opens the portfolio request modal.
#[component]
pub fn Portfolio() -> impl IntoView {
    let modal_open = RwSignal::new(false);

    view! {
      <section id="portfolio" class="section">
        <div class="container">
          <SectionTitle
            title="Nos Réalisations"
            subtitle="Découvrez comment nous avons aidé nos clients à atteindre leurs objectifs."
          />
          <div class="grid grid-2">
            {PROJECTS
              .iter()
              .map(|project| {
                view! {
                  <div class="project">
                    <img src=project.image alt=project.title loading="lazy" />
                    <div class="project-shade"></div>
                    <div class="project-caption">
                      <span class="project-category">{project.category}</span>
                      <h3>{project.title}</h3>
                    </div>
                  </div>
                }
              })
              .collect_view()}
          </div>
          <div class="section-cta">
            <button class="btn btn-primary" on:click=move |_| modal_open.set(true)>
              "Accéder au Portfolio complet"
            </button>
          </div>
        </div>
        <Show when=move || modal_open.get()>
          <PortfolioModal on_close=Callback::new(move |_| modal_open.set(false)) />
        </Show>
      </section>
    }
}

#[component]
pub fn Testimonials() -> impl IntoView {
    view! {
      <section id="testimonials" class="section section-muted">
        <div class="container">
          <SectionTitle
            title="Ce Que Disent Nos Clients"
            subtitle="La confiance de nos partenaires est notre plus grande fierté."
          />
          <div class="grid grid-2 narrow">
            {TESTIMONIALS
              .iter()
              .map(|t| {
                view! {
                  <figure class="card testimonial">
                    <img src=t.avatar alt=t.author class="avatar" />
                    <blockquote>{format!("\"{}\"", t.quote)}</blockquote>
                    <figcaption>
                      <strong>{t.author}</strong>
                      <span>{t.role}</span>
                    </figcaption>
                  </figure>
                }
              })
              .collect_view()}
          </div>
        </div>
      </section>
    }
}
