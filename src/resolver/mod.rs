use log::{debug, info};
use rand::Rng;
use std::collections::HashMap;
use std::fs;

use crate::config::DEFAULT_FID;
use crate::errors::Result;
use crate::models::frame::{FrameAction, InteractionContext};
use crate::models::token::ResolvedSymbol;
use crate::util;

/// username -> FID 查找表，进程启动时构建一次，之后只读
///
/// 数据来自离线join产出的JSON数组 `[[username, fid], ...]`。
/// 重复的username后写覆盖，与标准映射构建语义一致。
pub struct FidLookup {
    // 保留装载顺序，随机选择按下标取
    entries: Vec<(String, u64)>,
    // 小写username索引，用于快速查找
    index: HashMap<String, usize>,
}

impl FidLookup {
    /// 从(username, fid)对构建查找表
    pub fn new(pairs: Vec<(String, u64)>) -> Self {
        let mut lookup = Self {
            entries: pairs,
            index: HashMap::new(),
        };
        lookup.rebuild_index();
        lookup
    }

    /// 从JSON文件加载查找表
    pub fn load_from_file(path: &str) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let pairs: Vec<(String, u64)> = serde_json::from_str(&data)?;
        info!("Loaded {} username mappings from {}", pairs.len(), path);
        Ok(Self::new(pairs))
    }

    /// 查找username对应的FID（键按小写匹配）
    pub fn get(&self, username: &str) -> Option<u64> {
        self.index.get(username).map(|&idx| self.entries[idx].1)
    }

    /// 按下标取条目
    pub fn entry_at(&self, index: usize) -> Option<&(String, u64)> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // 重建索引，后写的条目覆盖先写的
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, (username, _)) in self.entries.iter().enumerate() {
            self.index.insert(username.to_lowercase(), i);
        }
    }
}

/// 身份解析器，把自由输入映射到规范的token symbol
///
/// 优先级（先命中先生效）：
/// 1. `@username` 输入，剥掉一个标记字符后查表
/// 2. 纯数字输入，按FID处理
/// 3. 其他文本输入，小写后查表
/// 4. 自身token信号（my_token按钮或无动作时的请求者身份）
/// 5. random按钮，从查找表均匀取一条
/// 6. URL中的fid参数
/// 7. 固定默认FID
pub struct Resolver {
    lookup: FidLookup,
    default_fid: u64,
}

impl Resolver {
    pub fn new(lookup: FidLookup) -> Self {
        Self {
            lookup,
            default_fid: DEFAULT_FID,
        }
    }

    pub fn with_default_fid(mut self, fid: u64) -> Self {
        self.default_fid = fid;
        self
    }

    pub fn lookup(&self) -> &FidLookup {
        &self.lookup
    }

    pub fn resolve(&self, ctx: &InteractionContext) -> ResolvedSymbol {
        self.resolve_with_rng(ctx, &mut rand::thread_rng())
    }

    /// 注入RNG的解析入口，随机选择可用固定种子复现
    pub fn resolve_with_rng<R: Rng>(
        &self,
        ctx: &InteractionContext,
        rng: &mut R,
    ) -> ResolvedSymbol {
        if let Some(text) = ctx
            .input_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            return self.resolve_input_text(text);
        }

        // 自身token：my_token按钮，或没有动作信号时由上下文携带的请求者身份
        match ctx.action {
            Some(FrameAction::MyToken) | None => {
                if let Some(fid) = ctx.requester_fid {
                    debug!("Resolved to requester fid {}", fid);
                    return ResolvedSymbol::ById(fid);
                }
            }
            _ => {}
        }

        if ctx.action == Some(FrameAction::Random) && !self.lookup.is_empty() {
            let index = rng.gen_range(0..self.lookup.len());
            if let Some((username, fid)) = self.lookup.entry_at(index) {
                debug!("Random pick: {} (fid {})", username, fid);
                return ResolvedSymbol::ById(*fid);
            }
        }

        // URL回退，畸形URL按未命中处理
        if let Some(fid) = ctx
            .url
            .as_deref()
            .and_then(|url| util::query_param(url, "fid"))
            .and_then(|value| value.parse::<u64>().ok())
        {
            return ResolvedSymbol::ById(fid);
        }

        ResolvedSymbol::ById(self.default_fid)
    }

    fn resolve_input_text(&self, text: &str) -> ResolvedSymbol {
        if let Some(stripped) = text.strip_prefix('@') {
            let key = stripped.to_lowercase();
            return match self.lookup.get(&key) {
                Some(fid) => ResolvedSymbol::ById(fid),
                None => ResolvedSymbol::Raw(stripped.to_string()),
            };
        }

        if let Ok(fid) = text.parse::<u64>() {
            return ResolvedSymbol::ById(fid);
        }

        let key = text.to_lowercase();
        match self.lookup.get(&key) {
            Some(fid) => ResolvedSymbol::ById(fid),
            None => ResolvedSymbol::Raw(text.to_string()),
        }
    }
}
