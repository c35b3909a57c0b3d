//! Maps an uploaded file's declared media type to a conversion category and
//! the fixed menu of output formats offered for it. Pure functions, no error
//! path: unknown media types degrade to `Unknown` rather than failing.

/// Conversion category of an uploaded file, derived from the media type's
/// top-level prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Document,
    Unknown,
}

impl FileCategory {
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.starts_with("image/") {
            FileCategory::Image
        } else if media_type.starts_with("video/") {
            FileCategory::Video
        } else if media_type.starts_with("audio/") {
            FileCategory::Audio
        } else if media_type.starts_with("application/") || media_type.starts_with("text/") {
            FileCategory::Document
        } else {
            FileCategory::Unknown
        }
    }

    /// Display label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Image => "imagem",
            FileCategory::Video => "vídeo",
            FileCategory::Audio => "áudio",
            FileCategory::Document => "documento",
            FileCategory::Unknown => "desconhecido",
        }
    }
}

/// The fixed prompt asking the user to pick one of the category's offered
/// output formats.
pub fn offer_message(category: FileCategory) -> String {
    let mut message = format!(
        "Identifiquei que você enviou um arquivo do tipo **{}**.\n\n",
        category.label()
    );
    message.push_str(match category {
        FileCategory::Image => {
            "Opções de conversão disponíveis: PNG, JPEG, GIF. Por favor, informe o formato desejado."
        }
        FileCategory::Video => {
            "Opções de conversão disponíveis:\n- Extrair áudio (MP3)\n- Converter vídeo para outro formato (ex: MP4)\nPor favor, informe o formato desejado."
        }
        FileCategory::Audio => {
            "Opções de conversão disponíveis: MP3, WAV, OGG. Por favor, informe o formato desejado."
        }
        FileCategory::Document => {
            "Opções de conversão disponíveis: PDF, DOCX, TXT. Por favor, informe o formato desejado."
        }
        FileCategory::Unknown => {
            "Não foi possível identificar o tipo do arquivo para sugerir opções de conversão."
        }
    });
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_media_type() {
        assert_eq!(
            FileCategory::from_media_type("image/png"),
            FileCategory::Image
        );
        assert_eq!(
            FileCategory::from_media_type("video/mp4"),
            FileCategory::Video
        );
        assert_eq!(
            FileCategory::from_media_type("audio/mpeg"),
            FileCategory::Audio
        );
        assert_eq!(
            FileCategory::from_media_type("application/pdf"),
            FileCategory::Document
        );
        assert_eq!(
            FileCategory::from_media_type("text/plain"),
            FileCategory::Document
        );
        assert_eq!(
            FileCategory::from_media_type("font/woff2"),
            FileCategory::Unknown
        );
        assert_eq!(FileCategory::from_media_type(""), FileCategory::Unknown);
    }

    #[test]
    fn test_offer_message_names_category_and_formats() {
        let message = offer_message(FileCategory::Image);
        assert!(message.contains("**imagem**"));
        assert!(message.contains("PNG, JPEG, GIF"));

        let message = offer_message(FileCategory::Video);
        assert!(message.contains("**vídeo**"));
        assert!(message.contains("Extrair áudio (MP3)"));
        assert!(message.contains("ex: MP4"));

        let message = offer_message(FileCategory::Audio);
        assert!(message.contains("MP3, WAV, OGG"));

        let message = offer_message(FileCategory::Document);
        assert!(message.contains("PDF, DOCX, TXT"));
    }

    #[test]
    fn test_offer_message_unknown_fallback() {
        let message = offer_message(FileCategory::Unknown);
        assert!(message.contains("**desconhecido**"));
        assert!(message.contains("Não foi possível identificar"));
    }

    #[test]
    fn test_classification_is_deterministic() {
        assert_eq!(
            offer_message(FileCategory::from_media_type("image/gif")),
            offer_message(FileCategory::from_media_type("image/gif"))
        );
    }
}
