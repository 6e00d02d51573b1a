//! Shared fixtures for the storefront integration tests
#![allow(dead_code)]

use shopline::config::ShopConfig;
use shopline::{AppController, EventBus, EventSelector, ShopEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_PREFIX: &str = "/api/weblarek";
pub const CDN_URL: &str = "https://cdn.example.com/content/weblarek";

pub const TIMER_ID: &str = "854cef69-976d-4c2a-a18c-2aa45046c390";
pub const LOLLIPOP_ID: &str = "c101ab44-ed99-4a54-990d-47aa2bb4e7d9";
pub const PRICELESS_ID: &str = "b06cde61-912f-4663-9751-09956c0eed67";

/// A controller talking to a mock server, plus every event it published
pub struct ShopWorld {
    pub mock_server: MockServer,
    pub controller: AppController,
    pub events: Rc<RefCell<Vec<ShopEvent>>>,
}

impl ShopWorld {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = ShopConfig::new(format!("{}{}", mock_server.uri(), API_PREFIX), CDN_URL);
        let controller = AppController::new(&config).expect("controller should build");

        let events = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&events);
        controller
            .events()
            .on(EventSelector::pattern(".*").unwrap(), move |event| {
                log.borrow_mut().push(event.clone());
                Ok(())
            });

        Self {
            mock_server,
            controller,
            events,
        }
    }

    /// Serve the sample catalog from the products endpoint
    pub async fn mount_catalog(&self) {
        Mock::given(method("GET"))
            .and(path(format!("{API_PREFIX}/product")))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_catalog()))
            .mount(&self.mock_server)
            .await;
    }

    /// Names of every event seen so far, in publish order
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(ShopEvent::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.name() == name)
            .count()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }
}

pub fn sample_catalog() -> serde_json::Value {
    serde_json::json!({
        "total": 3,
        "items": [
            {
                "id": TIMER_ID,
                "description": "Если планируете решать задачи в тренажёре, берите два.",
                "image": "/5_Dots.svg",
                "title": "+1 час в сутках",
                "category": "софт-скил",
                "price": 750
            },
            {
                "id": LOLLIPOP_ID,
                "description": "Лизните этот леденец, чтобы мгновенно запоминать и узнавать любой цветовой код CSS.",
                "image": "/Shell.svg",
                "title": "HEX-леденец",
                "category": "другое",
                "price": 1450
            },
            {
                "id": PRICELESS_ID,
                "description": "Будет стоять над душой и не давать прокрастинировать.",
                "image": "/Asterisk_2.svg",
                "title": "Мамка-таймер",
                "category": "софт-скил",
                "price": null
            }
        ]
    })
}
