use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fs;

// 参与随机选择的精选FID集合（已完成fan token拍卖的用户）
const CURATED_FIDS: &[u64] = &[
    12, 37, 239, 274, 528, 602, 2904, 8685, 11124, 13983, 245124, 281836, 311933, 366713, 472,
    539, 557, 880, 7960, 16148, 278406, 284063, 309710, 337018, 403619, 510364, 66, 358, 577,
    1285, 1689, 1970, 2211, 2282, 7258, 7732, 10259, 242661, 310928, 385955, 758919, 762, 1214,
    2391, 5431, 6714, 6806, 11528, 214447, 270504, 344203, 350139, 398596, 404871, 2, 2745, 3642,
    3895, 7097, 7464, 281289, 446697, 459385, 478906, 8, 20, 169, 426, 1048, 1325, 1471, 1918,
    2163, 4085, 4482, 193158, 293719, 412843, 490435, 1606, 4461, 5650, 13874, 247143, 320215,
    354669, 408746, 410943, 129, 251, 1236, 1886, 2252, 7418, 221578, 258848, 269694, 281676,
    436577, 3, 207, 225, 4327, 4905, 5309, 12256, 301340, 315256, 328757, 414955, 426045, 541292,
    784003, 99, 378, 616, 771, 2210, 253127, 276562, 308045, 327165, 406157, 420540, 516028, 56,
    2923, 3112, 3621, 3635, 4179, 5181, 9856, 211693, 212556, 237884, 326040, 478308, 18, 2802,
    193928, 230147, 18910, 3115, 323251, 406815, 10144, 449539, 337090, 397392, 4715, 418456,
    599368, 193930, 297319, 12048, 372323, 434908, 19105, 8451, 210628, 439396, 285462, 191503,
    296687, 1068, 268455, 8447, 8405, 302556, 534, 245579, 213310, 12921, 311845, 456735, 2480,
    308536, 321969, 4513, 379089, 262938, 196149, 72, 309567, 211205, 14351, 3652, 1407, 5701,
    280, 6596, 9816,
];

/// 完整档案数据集中的一条记录，只取需要的字段
#[derive(Debug, Deserialize)]
struct ProfileRecord {
    #[serde(rename = "profileName")]
    profile_name: String,
    fid: u64,
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let input_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("moxie_resolve_data.json");
    let output_path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or("data/output_file.json");

    // 读取完整档案数据集
    let data = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path))?;
    let records: Vec<ProfileRecord> =
        serde_json::from_str(&data).context("Failed to parse profile dataset")?;

    // 过滤精选FID并投影为(username, fid)对
    let curated: HashSet<u64> = CURATED_FIDS.iter().copied().collect();
    let pairs: Vec<(String, u64)> = records
        .into_iter()
        .filter(|record| curated.contains(&record.fid))
        .map(|record| (record.profile_name, record.fid))
        .collect();

    // 写出查找表数据集
    if let Some(parent) = std::path::Path::new(output_path).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, serde_json::to_string_pretty(&pairs)?)
        .with_context(|| format!("Failed to write {}", output_path))?;

    println!("Result has been written to {}", output_path);
    println!(
        "Found {} matches out of {} FIDs in the curated set",
        pairs.len(),
        CURATED_FIDS.len()
    );

    Ok(())
}
