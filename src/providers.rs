pub mod base;
pub mod configs;
pub mod openai;
pub mod utils;

#[cfg(test)]
pub mod mock;

use indoc::indoc;

/// Fixed system instruction prepended to every model call: assistant persona
/// scoped strictly to file-conversion assistance.
pub const SYSTEM_PROMPT: &str = indoc! {"
    Você é um assistente especializado em conversão de arquivos.
    Quando o usuário enviar um arquivo sem digitar nada, você deverá identificar o tipo do arquivo (imagem, documento, vídeo, áudio, etc.)
    e apresentar ao usuário as opções de conversão disponíveis com base nesse tipo.
    Caso o usuário já tenha enviado um arquivo e especificado um tipo de conversão, realize o procedimento solicitado.
    Responda somente sobre assuntos relacionados à conversão de arquivos.
"};
