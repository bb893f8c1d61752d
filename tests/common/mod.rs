//! Scripted browser fake and page fixtures shared by the workflow tests.
//!
//! A fake page is a queue of page states. Navigations (`goto`,
//! `wait_for_navigation`) advance to the next state; `html()` consumes
//! snapshots within the current state, repeating the last one, which lets
//! a test model a my-submissions page that changes while being polled.
//! Every interaction is recorded for assertions.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;
use url::Url;

use cfdriver::browser::{BrowserHandle, BrowserSession, Launch, PageHandle};
use cfdriver::scrape::Fragment;
use cfdriver::store::SessionNotifier;
use cfdriver::{Config, Error, PollPolicy, Result};

/// Engine config tuned for tests: millisecond polling, original attempt
/// budget.
pub fn test_config() -> Config {
    let mut conf = Config::default();
    conf.set_poll(PollPolicy::new(Duration::from_millis(1), 60));
    conf
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Goto(String),
    WaitFor(&'static str),
    Html,
    Click(&'static str),
    Type {
        fragment: &'static str,
        text: String,
    },
    Select {
        fragment: &'static str,
        value: String,
    },
    AwaitNavigation,
}

type PageState = VecDeque<String>;

pub struct FakePage {
    states: Mutex<VecDeque<PageState>>,
    events: Mutex<Vec<Event>>,
    started: AtomicBool,
    html_calls: AtomicUsize,
    closed: AtomicBool,
}

impl FakePage {
    /// One snapshot per state; every navigation advances one state.
    pub fn new(states: Vec<String>) -> Arc<Self> {
        Self::with_states(states.into_iter().map(|html| vec![html]).collect())
    }

    /// Full control: each state is the list of snapshots `html()` returns
    /// in order, repeating the last.
    pub fn with_states(states: Vec<Vec<String>>) -> Arc<Self> {
        Arc::new(Self {
            states: Mutex::new(states.into_iter().map(VecDeque::from).collect()),
            events: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
            html_calls: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        })
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn advance_state(&self) {
        let mut states = self.states.lock().unwrap();
        if states.len() > 1 {
            states.pop_front();
        }
    }

    fn current_snapshot(&self) -> String {
        let states = self.states.lock().unwrap();
        states
            .front()
            .and_then(|state| state.front())
            .cloned()
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn gotos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Goto(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn clicks(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Click(fragment) => Some(fragment),
                _ => None,
            })
            .collect()
    }

    pub fn typed(&self) -> Vec<(&'static str, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Type { fragment, text } => Some((fragment, text)),
                _ => None,
            })
            .collect()
    }

    pub fn selected(&self) -> Vec<(&'static str, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Select { fragment, value } => Some((fragment, value)),
                _ => None,
            })
            .collect()
    }

    pub fn waited_for(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::WaitFor(fragment) => Some(fragment),
                _ => None,
            })
            .collect()
    }

    pub fn html_calls(&self) -> usize {
        self.html_calls.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Index of the first matching event; panics if absent.
    pub fn position_of(&self, wanted: &Event) -> usize {
        self.events()
            .iter()
            .position(|event| event == wanted)
            .unwrap_or_else(|| panic!("event {:?} was not recorded", wanted))
    }
}

#[async_trait]
impl PageHandle for FakePage {
    async fn goto(&self, url: &Url) -> Result<()> {
        self.record(Event::Goto(url.to_string()));
        if self.started.swap(true, Ordering::SeqCst) {
            self.advance_state();
        }
        Ok(())
    }

    async fn wait_for(&self, fragment: &Fragment, _timeout: Duration) -> Result<()> {
        self.record(Event::WaitFor(fragment.name()));
        let snapshot = self.current_snapshot();
        let present = Html::parse_document(&snapshot)
            .select(fragment.selector())
            .next()
            .is_some();
        if present {
            Ok(())
        } else {
            Err(Error::ElementNotFound {
                element: fragment.name(),
            })
        }
    }

    async fn html(&self) -> Result<String> {
        self.record(Event::Html);
        self.html_calls.fetch_add(1, Ordering::SeqCst);
        let mut states = self.states.lock().unwrap();
        let state = state_front(&mut states);
        if state.len() > 1 {
            Ok(state.pop_front().unwrap_or_default())
        } else {
            Ok(state.front().cloned().unwrap_or_default())
        }
    }

    async fn click(&self, fragment: &Fragment) -> Result<()> {
        self.record(Event::Click(fragment.name()));
        Ok(())
    }

    async fn type_into(&self, fragment: &Fragment, text: &str) -> Result<()> {
        self.record(Event::Type {
            fragment: fragment.name(),
            text: text.to_owned(),
        });
        Ok(())
    }

    async fn select_value(&self, fragment: &Fragment, value: &str) -> Result<()> {
        self.record(Event::Select {
            fragment: fragment.name(),
            value: value.to_owned(),
        });
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<()> {
        self.record(Event::AwaitNavigation);
        self.advance_state();
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn state_front<'a>(states: &'a mut VecDeque<PageState>) -> &'a mut PageState {
    if states.is_empty() {
        states.push_back(PageState::new());
    }
    states.front_mut().unwrap()
}

pub struct FakeBrowser {
    pages: Mutex<VecDeque<Arc<FakePage>>>,
    opened: AtomicUsize,
}

impl FakeBrowser {
    pub fn new(pages: Vec<Arc<FakePage>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            opened: AtomicUsize::new(0),
        })
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserHandle for FakeBrowser {
    async fn open_page(&self) -> Result<Arc<dyn PageHandle>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let page = self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Page {
                detail: "no scripted pages left".to_owned(),
            })?;
        Ok(page as Arc<dyn PageHandle>)
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

pub struct FakeLauncher {
    browser: Arc<FakeBrowser>,
}

impl FakeLauncher {
    pub fn new(browser: Arc<FakeBrowser>) -> Self {
        Self { browser }
    }
}

#[async_trait]
impl Launch for FakeLauncher {
    async fn launch(&self) -> Result<Arc<dyn BrowserHandle>> {
        Ok(Arc::clone(&self.browser) as Arc<dyn BrowserHandle>)
    }
}

/// Session whose only browser serves the given pages in order.
pub fn session_with_pages(pages: Vec<Arc<FakePage>>) -> (BrowserSession, Arc<FakeBrowser>) {
    let browser = FakeBrowser::new(pages);
    let session = BrowserSession::with_launcher(Box::new(FakeLauncher::new(Arc::clone(&browser))));
    (session, browser)
}

/// Notifier that only counts how often it fired.
#[derive(Debug, Default)]
pub struct CountingNotifier {
    count: AtomicUsize,
}

impl CountingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl SessionNotifier for CountingNotifier {
    fn session_changed(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// --- page fixtures ------------------------------------------------------

fn header_bar(handle: Option<&str>) -> String {
    let links = match handle {
        Some(handle) => format!(
            r#"<a href="/profile/{handle}">{handle}</a> | <a href="/x7/logout">Logout</a>"#,
            handle = handle
        ),
        None => r#"<a href="/enter?back=%2F">Enter</a> | <a href="/register">Register</a>"#
            .to_owned(),
    };
    format!(
        r#"<div class="lang-chooser">
            <div><a href="?locale=en">English</a> <a href="?locale=ru">Russian</a></div>
            <div>{}</div>
        </div>"#,
        links
    )
}

fn site_page(handle: Option<&str>, body: &str) -> String {
    format!(
        "<html><body>{}{}</body></html>",
        header_bar(handle),
        body
    )
}

/// The front page, header only.
pub fn front_page(handle: Option<&str>) -> String {
    site_page(handle, "")
}

/// The `/enter` page with the login form.
pub fn enter_page(handle: Option<&str>) -> String {
    site_page(
        handle,
        r#"<form id="enterForm">
            <input id="handleOrEmail" type="text"/>
            <input id="password" type="password"/>
            <input class="submit" type="submit" value="Login"/>
        </form>"#,
    )
}

/// A profile page for `handle`.
pub fn profile_page(handle: &str, rating: i32, level: &str, avatar: &str) -> String {
    site_page(
        Some(handle),
        &format!(
            r#"<div class="title-photo"><img src="{avatar}"/></div>
            <div class="user-rank"><span>{level}</span></div>
            <div class="info">
                <ul>
                    <li>Contest rating: <span>{rating}</span></li>
                    <li>Contribution: <span>+3</span></li>
                </ul>
            </div>"#,
            avatar = avatar,
            level = level,
            rating = rating
        ),
    )
}

/// The `/contests` page. Row helpers below build the two tables.
pub fn contests_page(handle: Option<&str>, upcoming_rows: &str, history_rows: &str) -> String {
    site_page(
        handle,
        &format!(
            r#"<div class="contestList">
                <div class="datatable"><div><table><tbody>
                    <tr><th>Name</th><th>Writers</th><th>Start</th><th>Length</th></tr>
                    {}
                </tbody></table></div></div>
                <div class="contests-table"><div class="datatable"><div><table><tbody>
                    <tr><th>Name</th><th>Writers</th><th>Start</th><th>Length</th></tr>
                    {}
                </tbody></table></div></div></div>
            </div>"#,
            upcoming_rows, history_rows
        ),
    )
}

pub fn upcoming_row(name: &str, organizer: &str, start: &str, length: &str) -> String {
    format!(
        "<tr><td>{}</td><td><a href=\"/profile/{}\">{}</a></td><td>{}</td><td>{}</td></tr>",
        name, organizer, organizer, start, length
    )
}

pub fn history_row(id: u64, name: &str, organizer: &str, start: &str, length: &str) -> String {
    format!(
        r#"<tr data-contestid="{id}">
            <td>{name}<br/><a href="/profile/{org}">{org}</a></td>
            <td><a href="/profile/{org}">{org}</a></td>
            <td>{start}</td>
            <td>{length}</td>
        </tr>"#,
        id = id,
        name = name,
        org = organizer,
        start = start,
        length = length
    )
}

/// A contest dashboard with its problems table.
pub fn problems_page(handle: Option<&str>, rows: &str) -> String {
    site_page(
        handle,
        &format!(
            r#"<div id="pageContent">
                <div class="datatable"><div><table class="problems"><tbody>
                    <tr><th>#</th><th>Name</th><th></th><th></th></tr>
                    {}
                </tbody></table></div></div>
            </div>"#,
            rows
        ),
    )
}

pub fn problem_row(contest_id: u64, index: &str, name: &str, limits: &str, solved: u32) -> String {
    format!(
        r#"<tr>
            <td class="id"><a href="/contest/{cid}/problem/{index}">{index}</a></td>
            <td><div style="float: left;">
                <div><a href="/contest/{cid}/problem/{index}">{name}</a></div>
                <div class="notice">
                    <div style="float: left;"><img src="io.png"/></div>
                    standard input/output
                    <br/>
                    {limits}
                </div>
            </div></td>
            <td></td>
            <td><a href="/problemset/status">x{solved}</a></td>
        </tr>"#,
        cid = contest_id,
        index = index,
        name = name,
        limits = limits,
        solved = solved
    )
}

/// A problem statement page. Empty optional sections are omitted from the
/// markup entirely, the way the site renders special formats.
pub fn statement_page(
    handle: Option<&str>,
    description: Option<&str>,
    input_spec: &str,
    output_spec: &str,
    samples: Option<&str>,
    note: Option<&str>,
) -> String {
    let mut sections = String::new();
    sections.push_str(r#"<div class="header"><div class="title">A. Problem</div></div>"#);
    if let Some(description) = description {
        sections.push_str(&format!("<div>{}</div>", description));
    }
    sections.push_str(&format!(
        r#"<div class="input-specification">{}</div>"#,
        input_spec
    ));
    sections.push_str(&format!(
        r#"<div class="output-specification">{}</div>"#,
        output_spec
    ));
    if let Some(samples) = samples {
        sections.push_str(&format!(r#"<div class="sample-tests">{}</div>"#, samples));
    }
    if let Some(note) = note {
        sections.push_str(&format!(r#"<div class="note">{}</div>"#, note));
    }
    site_page(
        handle,
        &format!(r#"<div class="problem-statement">{}</div>"#, sections),
    )
}

/// The submit form, optionally re-rendered with the duplicate-code notice.
pub fn submit_form_page(handle: Option<&str>, duplicate_notice: bool) -> String {
    let notice = if duplicate_notice {
        r#"<span class="error for__source">You have submitted exactly the same code before</span>"#
    } else {
        ""
    };
    site_page(
        handle,
        &format!(
            r#"<form class="submit-form">
                <select name="programTypeId">
                    <option value="54">GNU G++17 7.3.0</option>
                    <option value="75">Rust 1.75.0 (2021)</option>
                </select>
                {}
                <textarea id="sourceCodeTextarea"></textarea>
                <input class="submit" type="submit" value="Submit"/>
            </form>"#,
            notice
        ),
    )
}

/// A my-submissions page with the given rows.
pub fn my_submissions_page(handle: Option<&str>, rows: &str) -> String {
    site_page(
        handle,
        &format!(
            r#"<table class="status-frame-datatable"><tbody>
                <tr class="first-row"><th>#</th><th>When</th><th>Who</th><th>Problem</th><th>Lang</th><th>Verdict</th><th>Time</th><th>Memory</th></tr>
                {}
            </tbody></table>"#,
            rows
        ),
    )
}

pub fn submission_row(
    id: u64,
    when: &str,
    who: &str,
    problem: &str,
    language: &str,
    verdict: &str,
    waiting: Option<&str>,
    time_ms: u32,
    memory_kb: u32,
) -> String {
    let waiting_attr = waiting
        .map(|value| format!(r#" waiting="{}""#, value))
        .unwrap_or_default();
    format!(
        r#"<tr data-submission-id="{id}">
            <td><a href="/submission/{id}">{id}</a></td>
            <td>{when}</td>
            <td><a href="/profile/{who}">{who}</a></td>
            <td><a>{problem}</a></td>
            <td>{language}</td>
            <td class="status-verdict-cell"{waiting_attr}><span>{verdict}</span></td>
            <td>{time_ms} ms</td>
            <td>{memory_kb} KB</td>
        </tr>"#,
        id = id,
        when = when,
        who = who,
        problem = problem,
        language = language,
        waiting_attr = waiting_attr,
        verdict = verdict,
        time_ms = time_ms,
        memory_kb = memory_kb
    )
}
