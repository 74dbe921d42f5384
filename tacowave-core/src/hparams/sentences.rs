/// Evaluation sentences used when no evaluation text file is given.
const EVAL_SENTENCES: &[&str] = &[
    // New York Times, July 8, 2017
    "Ученые из лаборатории ЦЕРНА говорят, что обнаружили новую частицу.",
    "Существует способ измерить острый эмоциональный интеллект, который никогда не выходил из моды.",
    "Президент Путин встретился с другими лидерами на конференции \"группы 20\".",
    "Законопроект Сената об отмене и замене закона О доступном уходе теперь находится под угрозой.",
    // Tacotron samples page
    "Генеративная состязательная сеть или вариационный автокодер.",
    "Базилярная мембрана и отоларингология не являются автокорреляциями.",
    "Он прочитал все целиком.",
    "Он читает книги.",
    "Не бросай меня здесь, в пустыне!",
    "Он подумал, что пришло время представить подарок.",
    "Это действительно потрясающе.",
    "Пунктуационная чувствительность, работает.",
    "Пунктуационная чувствительность работает.",
    "Автобусы не проблема, они на самом деле обеспечивают решение",
    "Автобусы не ПРОБЛЕМА, они на самом деле обеспечивают РЕШЕНИЕ.",
    "Быстрая коричневая лиса перепрыгивает через ленивую собаку.",
    "быстрая коричневая лиса перепрыгивает через ленивую собаку?",
    "Рыла свинья белорыла, тупорыла; полдвора рылом изрыла, вырыла, подрыла.",
    "И прыгают скороговорки, как караси на сковородке.",
    "Голубая Лагуна американский романтический приключенческий фильм тысяча девятьсот восьмидесятого года.",
    "Аэропорт тадзима обслуживает Тоёока.",
    "Талиб Куили подтвердил новостному сайту, что он выпустит альбом в следующем году.",
    // Training data
    " Подробности мало кому интересны. Достаточно только сказать. Завод - это сделанная из сети западня в десять сажен длиною и саженей пять в ширину.",
    "но на другой же месяц попался в краже мешков.",
    "Архиерей посадил Мисаила с собой и стал говорить о том, какие новости проявились в его епархии.",
    "Где же это слыхано и видано, чтобы кошка собиралась говорить по телефону?",
    "И вот однажды, с первым попутным ветром, на исходе ночи, но еще в глубокой тьме, сотни лодок отплывают от Крымского полуострова под парусами в море.",
];

pub(super) fn default_sentences() -> Vec<String> {
    EVAL_SENTENCES.iter().map(|s| s.to_string()).collect()
}
