use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use texting_robots::Robot;

use crate::config::Config;
use crate::util;

/// Per-host robots.txt gate. Rules are fetched lazily, once per host,
/// and cached for the session. A host whose robots.txt cannot be
/// fetched or parsed is treated as allowing everything.
pub(super) struct RobotsGate {
    config: Arc<Config>,
    cache: Mutex<HashMap<String, Option<Robot>>>,
}

impl RobotsGate {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn allows(&self, url: &str) -> bool {
        if !self.config.robotstxt_obey {
            return true;
        }
        let Some(host) = util::get_host(url) else {
            // Robot rules don't apply without a host.
            return true;
        };
        let Some(robots_url) = util::robots_url(url) else {
            return true;
        };

        let mut cache = self.cache.lock().unwrap();
        let robot = cache
            .entry(host)
            .or_insert_with(|| fetch_rules(&self.config.bot_name, &robots_url));
        match robot {
            Some(robot) => robot.allowed(url),
            None => true,
        }
    }
}

fn fetch_rules(bot_name: &str, robots_url: &str) -> Option<Robot> {
    let response = ureq::get(robots_url).call().ok()?;
    let body = response.into_string().ok()?;
    Robot::new(bot_name, body.as_bytes()).ok()
}
