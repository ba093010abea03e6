/// 默认回退FID，未命中任何解析规则时使用
pub const DEFAULT_FID: u64 = 5650;

pub struct Config {
    pub graph_endpoint: String,
    pub social_endpoint: String,
    pub social_api_key: Option<String>,
    pub lookup_path: String,
    pub default_fid: u64,
    pub snapshot_window: usize,
    pub chart_width: f64,
    pub chart_height: f64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            graph_endpoint: "https://api.studio.thegraph.com/query/23537/moxie_protocol_stats_mainnet/version/latest".to_string(),
            social_endpoint: "https://api.airstack.xyz/gql".to_string(),
            social_api_key: None,
            lookup_path: "data/output_file.json".to_string(),
            default_fid: DEFAULT_FID,
            snapshot_window: 24,
            chart_width: 1050.0,
            chart_height: 350.0,
            request_timeout_secs: 10,
        }
    }

    pub fn with_graph_endpoint(mut self, endpoint: &str) -> Self {
        self.graph_endpoint = endpoint.to_string();
        self
    }

    pub fn with_social_endpoint(mut self, endpoint: &str) -> Self {
        self.social_endpoint = endpoint.to_string();
        self
    }

    pub fn with_social_api_key(mut self, key: Option<String>) -> Self {
        self.social_api_key = key;
        self
    }

    pub fn with_lookup_path(mut self, path: &str) -> Self {
        self.lookup_path = path.to_string();
        self
    }

    pub fn with_default_fid(mut self, fid: u64) -> Self {
        self.default_fid = fid;
        self
    }

    pub fn with_snapshot_window(mut self, window: usize) -> Self {
        self.snapshot_window = window;
        self
    }

    pub fn with_chart_size(mut self, width: f64, height: f64) -> Self {
        self.chart_width = width;
        self.chart_height = height;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
