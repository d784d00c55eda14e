// 首页 HTML 解析
// 每个 [data-groups] 节点对应一行包裹记录

use std::fmt;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::warn;

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#fTrackingPaquetes [data-groups]").expect("row selector"));

struct FieldSelectors {
    condition: Selector,
    tracking_number: Selector,
    content: Selector,
    sender: Selector,
    weight: Selector,
}

static FIELDS: LazyLock<FieldSelectors> = LazyLock::new(|| FieldSelectors {
    condition: Selector::parse(".packagecondition").expect("field selector"),
    tracking_number: Selector::parse(".trackingnumber").expect("field selector"),
    content: Selector::parse(".packagecontent").expect("field selector"),
    sender: Selector::parse(".packagesender").expect("field selector"),
    weight: Selector::parse(".packageweight").expect("field selector"),
});

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub condition: String,
    pub tracking_number: String,
    pub content: String,
    pub sender: String,
    pub weight: String,
    pub status: String,
    pub status_label: String,
    pub status_formatted: String,
}

/// 输出列表里的一行，解析失败的行序列化成空对象 {}
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PackageRow {
    Parsed(Package),
    Empty {},
}

/// 单行解析失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolicy {
    /// 用空对象占位，和页面行数保持一致
    IncludeEmpty,
    /// 直接丢弃失败的行
    Skip,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ExtractError {
    MissingAttr(&'static str),
    MalformedGroups(String),
    MissingField(&'static str),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingAttr(name) => write!(f, "missing attribute {}", name),
            ExtractError::MalformedGroups(value) => {
                write!(f, "malformed data-groups value: {:?}", value)
            }
            ExtractError::MissingField(name) => write!(f, "missing field element .{}", name),
        }
    }
}

impl std::error::Error for ExtractError {}

/// 状态码对照表，未知状态一律映射为 na
fn format_status(status: &str) -> &'static str {
    match status {
        "status1" => "origin",
        "status2" => "air line / ship",
        "status3" => "customs",
        "status4" => "distribution center",
        "status6" => "transit",
        "status5" => "available",
        "status7" => "availableV2",
        _ => "na",
    }
}

// 取第一个匹配元素的第一个文本子节点，元素存在但没有文本时给空串
fn field_text(
    row: ElementRef<'_>,
    selector: &Selector,
    name: &'static str,
) -> Result<String, ExtractError> {
    let element = row
        .select(selector)
        .next()
        .ok_or(ExtractError::MissingField(name))?;
    let text = element
        .children()
        .find_map(|child| child.value().as_text().map(|t| t.to_string()))
        .unwrap_or_default();
    Ok(text)
}

/// 把一个 [data-groups] 节点转成一条包裹记录
pub fn transform_package(row: ElementRef<'_>) -> Result<Package, ExtractError> {
    let groups = row
        .value()
        .attr("data-groups")
        .ok_or(ExtractError::MissingAttr("data-groups"))?;

    // data-groups 形如 "<分组前缀> <状态码> <状态文本>"，必须正好三段
    let mut tokens = groups.split_whitespace();
    let (Some(_prefix), Some(status), Some(status_label), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ExtractError::MalformedGroups(groups.to_string()));
    };

    Ok(Package {
        condition: field_text(row, &FIELDS.condition, "packagecondition")?,
        tracking_number: field_text(row, &FIELDS.tracking_number, "trackingnumber")?,
        content: field_text(row, &FIELDS.content, "packagecontent")?,
        sender: field_text(row, &FIELDS.sender, "packagesender")?,
        weight: field_text(row, &FIELDS.weight, "packageweight")?,
        status: status.to_string(),
        status_label: status_label.to_string(),
        status_formatted: format_status(status).to_string(),
    })
}

/// 解析整个首页，按策略处理失败的行
pub fn parse_packages(html: &str, policy: RowPolicy) -> Vec<PackageRow> {
    let document = Html::parse_document(html);
    let mut rows = Vec::new();

    for node in document.select(&ROW_SELECTOR) {
        match transform_package(node) {
            Ok(package) => rows.push(PackageRow::Parsed(package)),
            Err(e) => {
                warn!("Failed to parse package row: {}", e);
                if policy == RowPolicy::IncludeEmpty {
                    rows.push(PackageRow::Empty {});
                }
            }
        }
    }

    rows
}
