//! Descriptive text panels of the dashboard

use serde::{Deserialize, Serialize};

/// Dashboard tab a panel or chart belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    TechChallenge,
    YearlyAnalysis,
    Distribution,
    Correlation,
    Model,
    Simulator,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::TechChallenge,
        Tab::YearlyAnalysis,
        Tab::Distribution,
        Tab::Correlation,
        Tab::Model,
        Tab::Simulator,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::TechChallenge => "Tech challenge",
            Tab::YearlyAnalysis => "Análise dados por ano",
            Tab::Distribution => "% distribuição ano",
            Tab::Correlation => "Correlações",
            Tab::Model => "Modelo",
            Tab::Simulator => "Simulador de Previsão",
        }
    }
}

/// One titled text panel
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub tab: Tab,
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
}

pub const DASHBOARD_TITLE: &str = "Previsão de Acidentes de Trânsito com Random Forest";

pub static SECTIONS: &[Section] = &[
    Section {
        tab: Tab::TechChallenge,
        title: "Qual é o problema?",
        paragraphs: &[
            "Pergunta de Negócio: Durante um acidente numa rodovia federal na região metropolitana de Recife, qual seria a classificação do acidente: COM VÍTIMAS ou SEM VÍTIMAS?",
            "Objetivo: Otimizar a alocação de recursos do estado (ambulâncias, polícias), reduzindo custos e excesso de trabalho em acidentes de menor gravidade.",
        ],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Coleta de dados",
        paragraphs: &[
            "Foram utilizados os dados extraídos do portal dados abertos do governo federal no link https://www.gov.br/prf/pt-br/acesso-a-informacao/dados-abertos/dados-abertos-da-prf",
        ],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Armazenamento",
        paragraphs: &["Arquivo estruturado csv com separador ;"],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Quais são os comportamentos dos dados?",
        paragraphs: &[
            "Existe um forte desequilíbrio de classes. A proporção é de 10 (COM VÍTIMAS) para 1 (SEM VÍTIMAS), isto faz com que o modelo tenha dificuldades em aprender os padrões de classes minoritárias.",
            "Os padrões dos acidentes não são constantes ao longo do tempo. Ao treinar com um ano e validar com o outro mostra que os tipos de acidente mudam de um ano para outro. Isso mostra o comportamento dos dados e a principal razão pela qual a validação temporal foi crucial.",
        ],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Quais são as particularidades?",
        paragraphs: &[
            "Necessidade de simplificação dos problemas, afunilando os dados com mínimo possível para um modelo mais estável e confiável.",
            "Ao simplificar as classes em apenas 2 (COM VITIMA e SEM VITIMA) passamos ter uma classificação binária fazendo com que o modelo alcançasse performance superiores.",
            "Alta cardinalidade em features geográficas. O local do acidente possuía muitos valores únicos (alta cardinalidade). Então agrupamos por 50 trechos mais críticos das rodovias e os demais classificamos como OUTROS.",
            "Necessidade de engenharia de feature para chegar ao objetivo.",
        ],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Como são as distribuições?",
        paragraphs: &[
            "A classe é muito assimétrica e a classe “COM VITIMA” domina o conjunto de dados.",
            "Distribuição das features não são estáveis ao longo do tempo. A proporção de colisões traseiras, por exemplo, são diferentes em 2023 e 2024. Isso reforça a necessidade de validação temporal.",
        ],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Como são as correlações entre as variáveis?",
        paragraphs: &["As correlações entre as variáveis são muito baixas."],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Existe sazonalidade?",
        paragraphs: &[
            "A sazonalidade é um fator muito forte nos dados. A sua existência é comprovada por duas features fase_dia e final_semana. A distribuição dos acidentes muda drasticamente do DIA para a NOITE e o comportamento do trânsito e, consequentemente, dos acidentes é diferente durante os finais de semana.",
            "Meses como janeiro, julho e dezembro por ser férias e feriados prolongados podem influenciar nos tipos de acidente.",
        ],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Análise estatísticas (médias, medianas, desvios, outliers etc)?",
        paragraphs: &[
            "Como reduzimos muito os dados para chegar em um modelo com a máxima eficiência, temos somente uma coluna numérica que é o ano.",
            "Foram encontrados outliers como em idade onde existiam idades que era o ano.",
        ],
    },
    Section {
        tab: Tab::TechChallenge,
        title: "Processamento dos dados",
        paragraphs: &[
            "Foi necessário o enriquecimento dos dados para ter algumas novas features para determinar qual seria o melhor modelo.",
            "Foi necessário tratar e até mesmo remover registros nulos.",
            "Foi necessário algumas tratativas para unificar os valores das features e reduzir a quantidade.",
        ],
    },
    Section {
        tab: Tab::Model,
        title: "Random Forest - O MODELO ESCOLHIDO",
        paragraphs: &[
            "O modelo Random Forest foi selecionado por oferecer a melhor combinação de estabilidade, desempenho e interpretabilidade. A métrica Recall foi o fator decisivo, garantindo maior eficácia na identificação da classe minoritária:",
            "Recall da Classe Minoritária (SEM VÍTIMAS): 0.62, significativamente superior ao 0.09 do XGBoost.",
            "Vantagens Adicionais: Menor overfitting e maior facilidade de interpretação do modelo.",
            "Acurácia Geral: 0.79, indicando uma boa performance geral.",
        ],
    },
    Section {
        tab: Tab::Simulator,
        title: "Simular um Novo Acidente",
        paragraphs: &[
            "Use os seletores abaixo para descrever um acidente e obter a previsão do modelo.",
        ],
    },
];

pub fn sections_for(tab: Tab) -> Vec<&'static Section> {
    SECTIONS.iter().filter(|s| s.tab == tab).collect()
}
