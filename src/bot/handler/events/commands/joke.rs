use poise::CreateReply;
use rand::seq::IndexedRandom;
use serenity::all::CreateEmbed;

use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;

const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "I told my wife she should embrace her mistakes. She gave me a hug.",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "I'm reading a book on anti-gravity. It's impossible to put down!",
    "What do you call a fake noodle? An Impasta!",
    "Why don't skeletons fight each other? They don't have the guts.",
    "What do you call cheese that isn't yours? Nacho cheese.",
    "Why did the bicycle fall over? Because it was two-tired.",
    "How does a penguin build its house? Igloos it together.",
    "I would tell you a joke about an empty pizza box, but it's too cheesy.",
    "What do you get when you cross a snowman and a vampire? Frostbite.",
    "Why are ghosts such bad liars? Because you can see right through them.",
    "What's orange and sounds like a parrot? A carrot.",
    "I invented a new word! Plagiarism.",
    "Did you hear about the mathematician who’s afraid of negative numbers? He’ll stop at nothing to avoid them.",
    "Why do we tell actors to 'break a leg?' Because every play has a cast.",
    "Helvetica and Times New Roman walk into a bar. 'Get out of here!' shouts the bartender. 'We don't serve your type.'",
    "Yesterday I saw a guy spill all his Scrabble letters on the road. I asked him, 'What’s the word on the street?'",
    "What’s the best thing about Switzerland? I don’t know, but the flag is a big plus.",
    "Why did the coffee file a police report? It got mugged.",
    "I'm so good at sleeping, I can do it with my eyes closed.",
    "Why was the big cat disqualified from the race? Because it was a cheetah.",
    "What do you call a bear with no teeth? A gummy bear.",
    "I asked the librarian if the library had any books on paranoia. She whispered, 'They're right behind you!'",
    "What did the zero say to the eight? Nice belt!",
    "What did one wall say to the other? I'll meet you at the corner.",
    "Why did the invisible man turn down the job offer? He couldn't see himself doing it.",
    "I have a joke about construction, but I'm still working on it.",
    "I used to play piano by ear, but now I use my hands.",
    "What do you call a boomerang that won't come back? A stick.",
    "Why did the golfer bring two pairs of pants? In case he got a hole in one.",
    "I'm on a seafood diet. I see food, and I eat it.",
    "What do you call a fish with no eyes? Fsh.",
    "Parallel lines have so much in common. It’s a shame they’ll never meet.",
    "My boss told me to have a good day, so I went home.",
    "Why can't you hear a pterodactyl go to the bathroom? Because the 'P' is silent.",
    "Why did the stadium get hot after the game? Because all the fans left.",
    "What's a vampire's favorite fruit? A neck-tarine.",
    "I don't trust stairs. They're always up to something.",
    "Why did the scarecrow get a promotion? He was outstanding in his field.",
    "What's brown and sticky? A stick.",
    "Why are pirates called pirates? Because they arrrr!",
    "I was wondering why the frisbee was getting bigger. Then it hit me.",
    "What do you call a lazy kangaroo? Pouch potato.",
    "Why was the math book sad? Because it had too many problems.",
    "What did the grape do when it got stepped on? It let out a little wine.",
    "Why don’t eggs tell jokes? They’d crack each other up.",
    "What’s the best way to watch a fly-fishing tournament? Live stream.",
    "What did the janitor say when he jumped out of the closet? 'Supplies!'",
    "I'm reading a horror story in Braille. Something bad is about to happen... I can feel it.",
    "What do you call an alligator in a vest? An investigator.",
    "If you see a robbery at an Apple Store, does that make you an iWitness?",
    "What do you call a sad strawberry? A blueberry.",
    "Why should you never trust a pig with a secret? Because it's bound to squeal.",
    "I got a new job as a human cannonball. They told me I'd be fired.",
    "Why did the Oreo go to the dentist? Because it lost its filling.",
    "How do you organize a space party? You planet.",
    "What has four wheels and flies? A garbage truck.",
    "What do you call a thieving alligator? A crook-o-dile.",
    "I used to be a baker, but I couldn't make enough dough.",
    "I have a fear of speed bumps. I'm slowly getting over it.",
    "Where do you learn to make ice cream? At sundae school.",
    "Why do bees have sticky hair? Because they use a honeycomb.",
    "How do you make a tissue dance? You put a little boogie in it.",
    "Why can’t a bicycle stand up by itself? It's two tired.",
    "Why did the tomato turn red? Because it saw the salad dressing!",
    "What do you call a pony with a cough? A little hoarse.",
    "Why was the belt arrested? For holding up a pair of pants.",
    "How do you find Will Smith in the snow? You look for the fresh prints.",
    "What do you call a man with a rubber toe? Roberto.",
    "Why is it annoying to eat next to basketball players? They're always dribbling.",
    "What do you call a factory that makes okay products? A satisfactory.",
    "I'm terrified of elevators. I'm going to start taking steps to avoid them.",
    "What do you call a dog that does magic tricks? A labracadabrador.",
    "What did the drummer call his twin daughters? Anna one, Anna two!",
    "Why did the cow go to outer space? To see the moooon.",
    "What do you call a sleeping bull? A bulldozer.",
    "Why did the can crusher quit his job? It was soda pressing.",
    "Why did the man get fired from the calendar factory? He took a couple of days off.",
    "What's the difference between a hippo and a zippo? One is really heavy, the other is a little lighter.",
    "I was going to tell a time-traveling joke, but you guys didn't like it.",
    "What do you get from a pampered cow? Spoiled milk.",
    "Why did the octopus beat the shark in a fight? Because it was well-armed.",
    "Why was the baby strawberry crying? Because its parents were in a jam.",
];

pub async fn joke(ctx: Context<'_>) -> HandlerResult<()> {
    let result: anyhow::Result<()> = async {
        let joke = {
            let mut rng = rand::rng();
            JOKES
                .choose(&mut rng)
                .copied()
                .unwrap_or("I had a joke, but I forgot it.")
        };

        ctx.send(
            CreateReply::default().embed(
                CreateEmbed::default()
                    .color(0xE67E22)
                    .title("Here's a joke for you!")
                    .description(joke),
            ),
        )
        .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}
