use std::cmp::Ordering;
use std::collections::HashSet;
use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone};
use gallery_domain::{Entry, ImageNode, TreeNode};
use serde::{Deserialize, Serialize};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Name,
    NameDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Name => "name",
            SortKey::NameDesc => "nameDesc",
        }
    }
}

/// 无法识别的取值一律按 `newest` 处理
impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "oldest" => SortKey::Oldest,
            "name" => SortKey::Name,
            "nameDesc" => SortKey::NameDesc,
            _ => SortKey::Newest,
        })
    }
}

/// 按修改时间划分的时间段，只作用于图片
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBucket {
    /// 与当前时间同一个自然日（按 `now` 所在时区）
    Today,
    /// 最近 7×24 小时，滚动窗口
    Week,
    /// 同年同月
    Month,
    /// 同一年
    Year,
}

impl DateBucket {
    /// 空字符串或未知取值返回 None（不过滤）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "today" => Some(DateBucket::Today),
            "week" => Some(DateBucket::Week),
            "month" => Some(DateBucket::Month),
            "year" => Some(DateBucket::Year),
            _ => None,
        }
    }

    pub fn contains<Tz: TimeZone>(&self, last_modified: u64, now: &DateTime<Tz>) -> bool {
        let Ok(ms) = i64::try_from(last_modified) else {
            return false;
        };
        let in_zone = || now.timezone().timestamp_millis_opt(ms).single();
        match self {
            DateBucket::Week => ms >= now.timestamp_millis() - 7 * DAY_MS,
            DateBucket::Today => in_zone().is_some_and(|t| t.date_naive() == now.date_naive()),
            DateBucket::Month => {
                in_zone().is_some_and(|t| t.year() == now.year() && t.month() == now.month())
            }
            DateBucket::Year => in_zone().is_some_and(|t| t.year() == now.year()),
        }
    }
}

/// 搜索范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// 只匹配当前层
    #[default]
    Shallow,
    /// 文件夹只匹配当前层，图片额外收集所有子目录中的匹配项
    Recursive,
}

/// 一组筛选参数；各项为空时对应阶段不生效
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default)]
    pub date_bucket: Option<DateBucket>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

impl FilterParams {
    /// 由界面控件的原始字符串构造，空串视为未设置
    pub fn from_inputs(search: &str, date_bucket: &str, sort: &str) -> Self {
        let sort = sort.trim();
        Self {
            search: search.trim().to_string(),
            search_mode: SearchMode::Shallow,
            date_bucket: DateBucket::parse(date_bucket),
            sort: if sort.is_empty() {
                None
            } else {
                sort.parse().ok()
            },
        }
    }

    pub fn recursive(mut self) -> Self {
        self.search_mode = SearchMode::Recursive;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.date_bucket.is_none() && self.sort.is_none()
    }
}

/// 依次执行 搜索 -> 时间段 -> 排序，返回新的节点，不修改输入
pub fn apply_filters<Tz: TimeZone>(
    node: &TreeNode,
    params: &FilterParams,
    now: &DateTime<Tz>,
) -> TreeNode {
    let mut out = search(node, &params.search, params.search_mode);

    if let Some(bucket) = params.date_bucket {
        out.images.retain(|img| bucket.contains(img.last_modified, now));
    }

    if let Some(key) = params.sort {
        sort_entries(&mut out.folders, key);
        sort_entries(&mut out.images, key);
    }

    out
}

/// 名称子串匹配，大小写不敏感；查询为空时原样返回副本。
/// 查询中的空白按原样参与匹配，去除首尾空白由 `FilterParams::from_inputs` 负责
pub fn search(node: &TreeNode, query: &str, mode: SearchMode) -> TreeNode {
    let query = query.to_lowercase();
    if query.is_empty() {
        return node.clone();
    }

    let folders = node
        .folders
        .iter()
        .filter(|f| name_matches(&f.name, &query))
        .cloned()
        .collect();

    let images = match mode {
        SearchMode::Shallow => node
            .images
            .iter()
            .filter(|i| name_matches(&i.name, &query))
            .cloned()
            .collect(),
        SearchMode::Recursive => {
            let mut images = Vec::new();
            let mut seen = HashSet::new();
            collect_matching_images(node, &query, &mut seen, &mut images);
            images
        }
    };

    TreeNode { folders, images }
}

// 按 path 去重，保证对结果再次搜索时不会重复收集
fn collect_matching_images(
    node: &TreeNode,
    query: &str,
    seen: &mut HashSet<String>,
    out: &mut Vec<ImageNode>,
) {
    for image in &node.images {
        if name_matches(&image.name, query) && seen.insert(image.path.clone()) {
            out.push(image.clone());
        }
    }
    for folder in &node.folders {
        collect_matching_images(&folder.content, query, seen, out);
    }
}

fn name_matches(name: &str, lowered_query: &str) -> bool {
    name.to_lowercase().contains(lowered_query)
}

/// 稳定排序，比较键相同的条目保持原顺序
pub fn sort_entries<E: Entry>(entries: &mut [E], key: SortKey) {
    entries.sort_by(|a, b| compare_entries(a, b, key));
}

pub fn compare_entries<E: Entry>(a: &E, b: &E, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.last_modified().cmp(&a.last_modified()),
        SortKey::Oldest => a.last_modified().cmp(&b.last_modified()),
        SortKey::Name => locale_compare(a.name(), b.name()),
        SortKey::NameDesc => locale_compare(b.name(), a.name()),
    }
}

/// 近似本地化排序：先忽略大小写比较，再让小写排在大写之前
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
