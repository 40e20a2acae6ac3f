use console::{Alignment, pad_str, style};

use crate::client::ApiClient;
use crate::routes::flower::FlowerCard;
use crate::routes::user::PublicUser;

pub const GRID_COLUMNS: usize = 5;
const CELL_WIDTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryState {
    Loading,
    Failed(String),
    Loaded(Vec<FlowerCard>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCommand {
    Open(u32),
    Close,
    Retry,
    Logout,
    Quit,
}

impl GalleryCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "c" | "close" => Some(Self::Close),
            "r" | "retry" => Some(Self::Retry),
            "l" | "logout" => Some(Self::Logout),
            "q" | "quit" => Some(Self::Quit),
            other => other.trim_start_matches('#').parse().ok().map(Self::Open),
        }
    }
}

/// 卡片数据只来自接口响应，客户端不保存自己的花卉列表
#[derive(Debug)]
pub struct GalleryView {
    state: GalleryState,
    selected: Option<FlowerCard>,
    notice: Option<String>,
}

impl Default for GalleryView {
    fn default() -> Self {
        Self {
            state: GalleryState::Loading,
            selected: None,
            notice: None,
        }
    }
}

impl GalleryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn selected(&self) -> Option<&FlowerCard> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == GalleryState::Loading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub async fn load(&mut self, client: &ApiClient) {
        self.state = match client.list_cards().await {
            Ok(list) => GalleryState::Loaded(list.data),
            Err(e) => {
                tracing::warn!("Failed to load flower cards: {}", e);
                GalleryState::Failed(e.user_message())
            }
        };
    }

    /// 只切回加载状态，请求由 `load` 发出，调用方可以在两者之间先渲染
    pub fn retry(&mut self) {
        self.state = GalleryState::Loading;
        self.selected = None;
        self.notice = None;
    }

    /// 返回 false 表示当前列表里没有这张卡片
    pub fn open(&mut self, id: u32) -> bool {
        let GalleryState::Loaded(cards) = &self.state else {
            return false;
        };
        match cards.iter().find(|c| c.id == id) {
            Some(card) => {
                self.selected = Some(card.clone());
                self.notice = None;
                true
            }
            None => {
                self.notice = Some(format!("No card #{}", id));
                false
            }
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.notice = None;
    }

    pub fn render(&self, user: &PublicUser) -> String {
        let mut out = format!(
            "{}    signed in as {}    [l] Logout\n\n",
            style("🌸 My Flower Cards Gallery").bold(),
            style(&user.username).cyan()
        );

        match &self.state {
            GalleryState::Loading => out.push_str("Loading flowers...\n"),
            GalleryState::Failed(message) => {
                out.push_str(&format!("{}\n", style(message).red()));
                out.push_str("[r] Retry\n");
            }
            GalleryState::Loaded(cards) => {
                for row in cards.chunks(GRID_COLUMNS) {
                    let line: String = row
                        .iter()
                        .map(|card| {
                            let cell = format!(
                                "{} {} #{}",
                                card.flower.emoji, card.flower.name, card.id
                            );
                            pad_str(&cell, CELL_WIDTH, Alignment::Left, None).into_owned()
                        })
                        .collect();
                    out.push_str(line.trim_end());
                    out.push('\n');
                }
                out.push_str("\nEnter a card number to view it, [q] to quit\n");
            }
        }

        if let Some(notice) = &self.notice {
            out.push_str(&format!("{}\n", style(notice).yellow()));
        }

        if let Some(card) = &self.selected {
            out.push_str(&render_detail(card));
        }

        out
    }
}

fn render_detail(card: &FlowerCard) -> String {
    let mut out = String::from("\n+----------------------------------------+\n");
    out.push_str(&format!("  {}\n", card.flower.emoji));
    out.push_str(&format!("  {}\n", style(&card.flower.name).bold()));
    out.push_str(&format!("  Card #{}\n", card.id));
    out.push_str(&format!("  Color Theme: {}\n", card.flower.color));
    if !card.flower.description.is_empty() {
        out.push_str(&format!("  {}\n", card.flower.description));
    }
    out.push_str("  [c] Close\n");
    out.push_str("+----------------------------------------+\n");
    out
}
