//! Generation Context - Value Objects

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GenerationDomainError;

/// 种子上限（含）
pub const MAX_SEED: u32 = 999_999;

/// Prompt 最大字符数
pub const MAX_PROMPT_CHARS: usize = 2000;

/// 上游渲染模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageModel {
    #[default]
    Flux,
    FluxPro,
    FluxCablyai,
}

impl ImageModel {
    pub const ALL: [ImageModel; 3] = [ImageModel::Flux, ImageModel::FluxPro, ImageModel::FluxCablyai];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::Flux => "flux",
            ImageModel::FluxPro => "flux-pro",
            ImageModel::FluxCablyai => "flux-cablyai",
        }
    }
}

impl std::fmt::Display for ImageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageModel {
    type Err = GenerationDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flux" => Ok(ImageModel::Flux),
            "flux-pro" => Ok(ImageModel::FluxPro),
            "flux-cablyai" => Ok(ImageModel::FluxCablyai),
            _ => Err(GenerationDomainError::UnknownModel(s.to_string())),
        }
    }
}

/// 随机种子
///
/// 每次生成都重新抽取，保证相同 prompt + model 也能得到不同的图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(u32);

impl Seed {
    pub fn new(value: u32) -> Result<Self, GenerationDomainError> {
        if value > MAX_SEED {
            return Err(GenerationDomainError::SeedOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// 从 `0..=MAX_SEED` 均匀抽取
    pub fn random() -> Self {
        Self(rand::thread_rng().gen_range(0..=MAX_SEED))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 用户输入的 prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Result<Self, GenerationDomainError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(GenerationDomainError::EmptyPrompt);
        }
        let chars = text.chars().count();
        if chars > MAX_PROMPT_CHARS {
            return Err(GenerationDomainError::PromptTooLong(chars));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 一次生成尝试
///
/// 不变量: seed 在构造时独立抽取，不复用之前的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: Prompt,
    pub model: ImageModel,
    pub seed: Seed,
}

impl GenerationRequest {
    pub fn new(prompt: Prompt, model: ImageModel) -> Self {
        Self {
            prompt,
            model,
            seed: Seed::random(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_model_names() {
        assert_eq!(ImageModel::default(), ImageModel::Flux);
        assert_eq!("flux-pro".parse::<ImageModel>().unwrap(), ImageModel::FluxPro);
        assert_eq!("FLUX-CablyAI".parse::<ImageModel>().unwrap(), ImageModel::FluxCablyai);
        assert!("dall-e".parse::<ImageModel>().is_err());
        for model in ImageModel::ALL {
            assert_eq!(model.as_str().parse::<ImageModel>().unwrap(), model);
        }
    }

    #[test]
    fn test_model_serde_names() {
        let json = serde_json::to_string(&ImageModel::FluxCablyai).unwrap();
        assert_eq!(json, "\"flux-cablyai\"");
        let model: ImageModel = serde_json::from_str("\"flux-pro\"").unwrap();
        assert_eq!(model, ImageModel::FluxPro);
    }

    #[test]
    fn test_seed_range() {
        assert!(Seed::new(MAX_SEED).is_ok());
        assert!(Seed::new(MAX_SEED + 1).is_err());
        for _ in 0..1000 {
            assert!(Seed::random().value() <= MAX_SEED);
        }
    }

    #[test]
    fn test_requests_draw_fresh_seeds() {
        let prompt = Prompt::new("a red circle").unwrap();
        let seeds: HashSet<u32> = (0..50)
            .map(|_| GenerationRequest::new(prompt.clone(), ImageModel::Flux).seed.value())
            .collect();
        assert!(seeds.len() > 1);
    }

    #[test]
    fn test_prompt_validation() {
        assert_eq!(Prompt::new("  a cat  ").unwrap().as_str(), "a cat");
        assert!(Prompt::new("   ").is_err());
        assert!(Prompt::new("x".repeat(MAX_PROMPT_CHARS + 1)).is_err());
    }
}
