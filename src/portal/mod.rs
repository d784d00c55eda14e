// 上游门户会话
// 登录只负责把 cookie 写进 jar，是否登录成功看 cookie 在不在

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};

use crate::error::AppError;

pub const LOGIN_URL: &str = "https://app.eps-int.com/login";
pub const HOME_URL: &str = "https://app.eps-int.com/TrackingPaquetes#filter=*";

/// 登录态 cookie，出现在 jar 里即视为已登录
const AUTOLOGIN_COOKIE: &str = "WebSite_autologin";

/// 上游门户的抽象，方便在测试里替换掉真实会话
#[async_trait]
pub trait Portal: Send + Sync {
    /// 提交表单登录，副作用是更新会话 cookie，不检查响应状态
    async fn login(&self) -> Result<(), AppError>;

    /// 拉取包裹列表首页原文
    async fn fetch_home(&self) -> Result<String, AppError>;

    /// 会话是否有效，纯本地判断，不发请求
    fn is_logged_in(&self) -> bool;
}

/// EPS 门户会话，整个进程共享一份
pub struct EpsPortal {
    client: Client,
    jar: Arc<Jar>,
    home_url: Url,
    username: String,
    password: String,
}

impl EpsPortal {
    pub fn new(username: &str, password: &str) -> Result<Self, reqwest::Error> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder().cookie_provider(jar.clone()).build()?;
        let home_url = Url::parse(HOME_URL).expect("home url is valid");

        Ok(EpsPortal {
            client,
            jar,
            home_url,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[async_trait]
impl Portal for EpsPortal {
    async fn login(&self) -> Result<(), AppError> {
        let payload = [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];
        self.client.post(LOGIN_URL).form(&payload).send().await?;
        Ok(())
    }

    async fn fetch_home(&self) -> Result<String, AppError> {
        let resp = self.client.get(self.home_url.clone()).send().await?;
        Ok(resp.text().await?)
    }

    fn is_logged_in(&self) -> bool {
        let Some(header) = self.jar.cookies(&self.home_url) else {
            return false;
        };
        let Ok(cookies) = header.to_str() else {
            return false;
        };
        cookies
            .split(';')
            .filter_map(|pair| pair.split('=').next())
            .any(|name| name.trim() == AUTOLOGIN_COOKIE)
    }
}
